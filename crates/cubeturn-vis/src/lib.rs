//! Cubeturn Visualization Server
//!
//! Serves one animated cube over HTTP and WebSocket.
//!
//! # Architecture
//!
//! - **Tick driver**: a tokio interval advances the controller's timeline
//! - **REST API**: submit moves, undo, reset, query state, start a solution
//! - **WebSocket**: streams controller events and accepts the same commands
//!
//! # Usage
//!
//! ```ignore
//! let config = VisConfig::from_env()?;
//! let server = CubeServer::from_config(&config)?;
//! server.serve(config.addr).await?;
//! ```

mod config;
mod error;
mod server;

pub use config::VisConfig;
pub use error::{Error, Result};
pub use server::{ApiRejection, AppState, CubeServer};
