//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por argumentos CLI, con variables de entorno como respaldo.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./utility_server --port 8080 \
//!   --timeout-io 60000 \
//!   --log-level debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 TIMEOUT_IO=60000 ./utility_server
//! ```

use clap::Parser;
use std::time::Duration;

/// Endpoint de chistes usado por defecto
pub const DEFAULT_JOKE_URL: &str = "https://api.chucknorris.io/jokes/random";

/// Configuración del servidor HTTP/1.0
#[derive(Debug, Clone, Parser)]
#[command(name = "utility_server")]
#[command(about = "Servidor HTTP/1.0 de utilidades: listado, conteo de palabras y compresión de carpetas")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (0 = puerto libre asignado por el SO)
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    // === Timeouts ===

    /// Deadline en milisegundos para /count-word y /zip-folder
    #[arg(long = "timeout-io", default_value = "120000", env = "TIMEOUT_IO")]
    pub io_timeout_ms: u64,

    /// Timeout en milisegundos para llamadas HTTP salientes
    #[arg(long = "timeout-outbound", default_value = "10000", env = "TIMEOUT_OUTBOUND")]
    pub outbound_timeout_ms: u64,

    // === Servicios externos ===

    /// URL de la API de chistes que usa /chuck-norris-joke
    #[arg(long = "joke-url", default_value = DEFAULT_JOKE_URL, env = "JOKE_URL")]
    pub joke_url: String,

    // === Logging ===

    /// Nivel de log (trace, debug, info, warn, error). RUST_LOG tiene prioridad.
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea la configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use utility_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "127.0.0.1:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }

    pub fn outbound_timeout(&self) -> Duration {
        Duration::from_millis(self.outbound_timeout_ms)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        if self.io_timeout_ms == 0 {
            return Err("IO timeout must be > 0".to_string());
        }
        if self.outbound_timeout_ms == 0 {
            return Err("Outbound timeout must be > 0".to_string());
        }

        if self.joke_url.trim().is_empty() {
            return Err("Joke URL must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║            Utility HTTP/1.0 Server Configuration             ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        println!();
        println!("⏱️  Timeouts:");
        println!("   Filesystem:   {} ms", self.io_timeout_ms);
        println!("   Outbound:     {} ms", self.outbound_timeout_ms);
        println!();
        println!("🔗 External:");
        println!("   Joke API:     {}", self.joke_url);
        println!();
        println!("📝 Log level:    {}", self.log_level);
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto (mismos valores que la CLI)
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            io_timeout_ms: 120_000,
            outbound_timeout_ms: 10_000,
            joke_url: DEFAULT_JOKE_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}
