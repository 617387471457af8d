//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use cubeturn_engine::EngineConfig;

use crate::error::{Error, Result};

/// Settings for one [`CubeServer`](crate::CubeServer).
#[derive(Debug, Clone)]
pub struct VisConfig {
    /// Address the HTTP server binds to.
    pub addr: SocketAddr,
    /// Interval of the tick driver.
    pub tick: Duration,
    pub engine: EngineConfig,
    /// Where move history is kept between runs; in memory when unset.
    pub session_file: Option<PathBuf>,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            tick: Duration::from_millis(16),
            engine: EngineConfig::default(),
            session_file: None,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from any key lookup. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = parsed(&lookup, "CUBETURN_ADDR")? {
            config.addr = addr;
        }
        let tick: Option<u64> = parsed(&lookup, "CUBETURN_TICK_MS")?;
        if let Some(ms) = tick {
            if ms == 0 {
                return Err(invalid("CUBETURN_TICK_MS", "must be greater than zero"));
            }
            config.tick = Duration::from_millis(ms);
        }
        if let Some(ms) = parsed(&lookup, "CUBETURN_TURN_MS")? {
            config.engine.turn_duration = Duration::from_millis(ms);
        }
        if let Some(ms) = parsed(&lookup, "CUBETURN_COOLDOWN_MS")? {
            config.engine.cooldown = Duration::from_millis(ms);
        }
        if let Some(limit) = parsed(&lookup, "CUBETURN_HISTORY_LIMIT")? {
            config.engine.history_limit = limit;
        }
        config.session_file = lookup("CUBETURN_SESSION_FILE")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        config.engine.validate()?;
        Ok(config)
    }
}

fn parsed<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| invalid(key, &e.to_string())),
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    Error::Config {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
