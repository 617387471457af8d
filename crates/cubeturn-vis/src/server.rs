//! Axum web server with WebSocket streaming of cube events.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use cubeturn_engine::{
    CubeController, CubeEvent, CubeState, CubeletTransform, JsonFileStore, MemoryStore,
    PlaybackStatus, Rejection, SessionStore, SliceFrame,
};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tower_http::cors::CorsLayer;

use crate::config::VisConfig;
use crate::error::Result;

/// Capacity of the event fan-out channel.
const EVENT_CAPACITY: usize = 256;

/// Shared application state.
pub struct AppState {
    controller: RwLock<CubeController>,
    events: broadcast::Sender<CubeEvent>,
    tick: Duration,
}

impl AppState {
    /// Run `op` against the controller, publish what it emitted and return
    /// the resulting state.
    async fn apply<F>(&self, op: F) -> std::result::Result<CubeState, Rejection>
    where
        F: FnOnce(&mut CubeController) -> std::result::Result<(), Rejection>,
    {
        let mut controller = self.controller.write().await;
        let outcome = op(&mut controller);
        self.publish(&mut controller);
        outcome.map(|()| controller.query_state())
    }

    async fn advance(&self, dt: Duration) {
        let mut controller = self.controller.write().await;
        controller.tick(dt);
        self.publish(&mut controller);
    }

    fn publish(&self, controller: &mut CubeController) {
        for event in controller.drain_events() {
            // No subscribers is fine
            let _ = self.events.send(event);
        }
    }
}

/// HTTP and WebSocket front for one cube.
pub struct CubeServer {
    state: Arc<AppState>,
}

impl CubeServer {
    /// Wrap an existing controller, ticking it every `tick`.
    pub fn new(controller: CubeController, tick: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            state: Arc::new(AppState {
                controller: RwLock::new(controller),
                events,
                tick,
            }),
        }
    }

    /// Build the controller and its session store from config.
    pub fn from_config(config: &VisConfig) -> Result<Self> {
        let store: Box<dyn SessionStore> = match &config.session_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "using session file");
                Box::new(JsonFileStore::new(path))
            }
            None => Box::new(MemoryStore::new()),
        };
        let controller = CubeController::with_store(config.engine.clone(), store)?;
        Ok(Self::new(controller, config.tick))
    }

    /// Receive every event the controller emits from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<CubeEvent> {
        self.state.events.subscribe()
    }

    /// Start autoplay of a solution before serving.
    pub async fn start_solution(
        &self,
        solution: &str,
    ) -> std::result::Result<CubeState, Rejection> {
        self.state.apply(|c| c.start_solution(solution)).await
    }

    /// Build the router for the server.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/api/state", get(state_handler))
            .route("/api/history", get(history_handler))
            .route("/api/cubelets", get(cubelets_handler))
            .route("/api/frame", get(frame_handler))
            .route("/api/move", post(move_handler))
            .route("/api/input", post(input_handler))
            .route("/api/direction", post(direction_handler))
            .route("/api/undo", post(undo_handler))
            .route("/api/reset", post(reset_handler))
            .route("/api/solve", get(autoplay_handler).post(solve_handler))
            .route("/api/solve/cancel", post(cancel_handler))
            // WebSocket for real-time updates
            .route("/ws", get(ws_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state.clone())
    }

    /// Advance the controller on a fixed interval until the task is aborted.
    pub fn spawn_ticker(&self) -> JoinHandle<()> {
        let state = self.state.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(state.tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut last = Instant::now();
            loop {
                interval.tick().await;
                let now = Instant::now();
                state.advance(now - last).await;
                last = now;
            }
        })
    }

    /// Run the tick driver and serve on `addr`.
    pub async fn serve(self, addr: SocketAddr) -> Result<()> {
        let ticker = self.spawn_ticker();
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Cube server running on http://{}", addr);
        let served = axum::serve(listener, self.router()).await;
        ticker.abort();
        Ok(served?)
    }
}

/// A rejection as an HTTP response.
#[derive(Debug)]
pub struct ApiRejection(pub Rejection);

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        let status = match self.0 {
            Rejection::InvalidNotation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::CONFLICT,
        };
        (status, Json(self.0)).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiRejection>;

fn respond<T>(outcome: std::result::Result<T, Rejection>) -> ApiResult<T> {
    outcome.map(Json).map_err(ApiRejection)
}

async fn state_handler(State(state): State<Arc<AppState>>) -> Json<CubeState> {
    Json(state.controller.read().await.query_state())
}

async fn history_handler(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.controller.read().await.history().to_tokens())
}

async fn cubelets_handler(State(state): State<Arc<AppState>>) -> Json<Vec<CubeletTransform>> {
    Json(state.controller.read().await.cubelet_transforms())
}

async fn frame_handler(State(state): State<Arc<AppState>>) -> Json<Option<SliceFrame>> {
    Json(state.controller.read().await.frame())
}

async fn autoplay_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    Json(state.controller.read().await.autoplay_status())
}

#[derive(Deserialize)]
struct MoveRequest {
    #[serde(rename = "move")]
    token: String,
}

async fn move_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<MoveRequest>,
) -> ApiResult<CubeState> {
    respond(state.apply(|c| c.submit_move(&req.token).map(drop)).await)
}

#[derive(Deserialize)]
struct InputRequest {
    token: String,
}

async fn input_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<InputRequest>,
) -> ApiResult<CubeState> {
    respond(state.apply(|c| c.handle_input(&req.token).map(drop)).await)
}

#[derive(Deserialize)]
struct DirectionRequest {
    /// Toggles when absent.
    reverse: Option<bool>,
}

async fn direction_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DirectionRequest>,
) -> ApiResult<CubeState> {
    respond(
        state
            .apply(|c| match req.reverse {
                Some(reverse) => c.set_reverse(reverse),
                None => c.toggle_reverse().map(drop),
            })
            .await,
    )
}

async fn undo_handler(State(state): State<Arc<AppState>>) -> ApiResult<CubeState> {
    respond(state.apply(|c| c.undo().map(drop)).await)
}

async fn reset_handler(State(state): State<Arc<AppState>>) -> ApiResult<CubeState> {
    respond(state.apply(CubeController::reset).await)
}

/// Either standard notation or an expanded primitive token list.
#[derive(Deserialize)]
#[serde(untagged)]
enum SolveRequest {
    Solution { solution: String },
    Tokens { tokens: Vec<String> },
}

async fn solve_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SolveRequest>,
) -> ApiResult<CubeState> {
    let outcome = state
        .apply(|c| match &req {
            SolveRequest::Solution { solution } => c.start_solution(solution),
            SolveRequest::Tokens { tokens } => c.start_play_tokens(tokens),
        })
        .await;
    respond(outcome)
}

async fn cancel_handler(State(state): State<Arc<AppState>>) -> Json<PlaybackStatus> {
    let mut controller = state.controller.write().await;
    controller.cancel_autosolve();
    state.publish(&mut controller);
    Json(controller.autoplay_status())
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    let mut events = state.events.subscribe();

    // Send initial state
    let initial = WsResponse::State(state.controller.read().await.query_state());
    if send_json(&mut socket, &initial).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(Ok(msg)) = msg else { break };
                match msg {
                    Message::Text(text) => match serde_json::from_str::<WsCommand>(&text) {
                        Ok(cmd) => {
                            let response = handle_ws_command(&state, cmd).await;
                            if send_json(&mut socket, &response).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => tracing::debug!(error = %e, "ignoring malformed ws command"),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            event = events.recv() => match event {
                Ok(event) => {
                    if send_json(&mut socket, &WsResponse::Event { event }).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "ws client lagging, dropped events");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

async fn send_json<T: Serialize>(
    socket: &mut WebSocket,
    value: &T,
) -> std::result::Result<(), axum::Error> {
    match serde_json::to_string(value) {
        Ok(json) => socket.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::warn!(error = %e, "failed to encode ws message");
            Ok(())
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    GetState,
    GetCubelets,
    GetPlayback,
    Input { token: String },
    Undo,
    Reset,
    Solve { solution: String },
    CancelSolve,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsResponse {
    State(CubeState),
    Cubelets { cubelets: Vec<CubeletTransform> },
    Playback(PlaybackStatus),
    Rejected { rejection: Rejection },
    Event { event: CubeEvent },
}

impl From<std::result::Result<CubeState, Rejection>> for WsResponse {
    fn from(outcome: std::result::Result<CubeState, Rejection>) -> Self {
        match outcome {
            Ok(state) => WsResponse::State(state),
            Err(rejection) => WsResponse::Rejected { rejection },
        }
    }
}

async fn handle_ws_command(state: &Arc<AppState>, cmd: WsCommand) -> WsResponse {
    match cmd {
        WsCommand::GetState => WsResponse::State(state.controller.read().await.query_state()),
        WsCommand::GetCubelets => WsResponse::Cubelets {
            cubelets: state.controller.read().await.cubelet_transforms(),
        },
        WsCommand::GetPlayback => {
            WsResponse::Playback(state.controller.read().await.autoplay_status())
        }
        WsCommand::Input { token } => {
            state.apply(|c| c.handle_input(&token).map(drop)).await.into()
        }
        WsCommand::Undo => state.apply(|c| c.undo().map(drop)).await.into(),
        WsCommand::Reset => state.apply(CubeController::reset).await.into(),
        WsCommand::Solve { solution } => state.apply(|c| c.start_solution(&solution)).await.into(),
        WsCommand::CancelSolve => state
            .apply(|c| {
                c.cancel_autosolve();
                Ok(())
            })
            .await
            .into(),
    }
}
