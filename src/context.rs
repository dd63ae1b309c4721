//! # Contexto de la Aplicación
//! src/context.rs
//!
//! Estado inmutable compartido por todos los handlers. Se construye una vez
//! al arrancar y se comparte con `Arc` entre los threads de conexión.

use crate::config::Config;
use crate::error::Result;
use crate::fsutil::CancelToken;
use std::time::Duration;

pub struct AppContext {
    /// Deadline de cada operación de filesystem
    pub io_timeout: Duration,

    /// URL de la API de chistes
    pub joke_url: String,

    /// Cliente HTTP saliente (con timeout ya configurado)
    pub http_client: reqwest::blocking::Client,
}

impl AppContext {
    pub fn from_config(config: &Config) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(config.outbound_timeout())
            .build()?;

        Ok(Self {
            io_timeout: config.io_timeout(),
            joke_url: config.joke_url.clone(),
            http_client,
        })
    }

    /// Token nuevo para un request, con el deadline de I/O configurado
    pub fn cancel_token(&self) -> CancelToken {
        CancelToken::with_timeout(self.io_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_default_config() {
        let ctx = AppContext::from_config(&Config::default()).unwrap();
        assert_eq!(ctx.io_timeout, Duration::from_secs(120));
        assert!(!ctx.cancel_token().is_cancelled());
    }

    #[test]
    fn test_cancel_token_uses_timeout() {
        let mut config = Config::default();
        config.io_timeout_ms = 1;
        let ctx = AppContext::from_config(&config).unwrap();

        let token = ctx.cancel_token();
        std::thread::sleep(Duration::from_millis(20));
        assert!(token.is_cancelled());
    }
}
