//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing-subscriber` con un `EnvFilter`. `RUST_LOG` tiene
//! prioridad sobre el nivel configurado por CLI.

use crate::error::{Result, ServerError};
use tracing_subscriber::EnvFilter;

/// Construye el filtro: `RUST_LOG` si existe, si no `level`
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| ServerError::Logging(format!("invalid log level '{}': {}", level, e)))
}

/// Instala el subscriber global (solo una vez por proceso)
pub fn init(level: &str) -> Result<()> {
    let filter = build_filter(level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| ServerError::Logging(e.to_string()))
}
