//! Cubeturn Visualization Server
//!
//! Serve one cube. An optional argument is a solution to play on startup,
//! e.g. `cubeturn-vis "R U R' U'"`.

use cubeturn_vis::{CubeServer, VisConfig};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cubeturn_vis=info,cubeturn_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VisConfig::from_env()?;
    tracing::info!(
        addr = %config.addr,
        tick_ms = config.tick.as_millis() as u64,
        turn_ms = config.engine.turn_duration.as_millis() as u64,
        "Starting cube server"
    );

    let server = CubeServer::from_config(&config)?;

    if let Some(solution) = env::args().nth(1) {
        if let Err(rejection) = server.start_solution(&solution).await {
            tracing::warn!(%rejection, "startup solution ignored");
        }
    }

    server.serve(config.addr).await?;
    Ok(())
}
