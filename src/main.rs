//! # Utility HTTP Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.0.

use utility_server::config::Config;
use utility_server::error::ServerError;
use utility_server::logging;
use utility_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Utility HTTP/1.0 Server");
    println!("=================================\n");

    if let Err(e) = start() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn start() -> Result<(), ServerError> {
    let config = Config::new();
    config.validate().map_err(ServerError::Config)?;

    logging::init(&config.log_level)?;
    config.print_summary();

    let mut server = Server::new(config)?;
    let addr = server.bind()?;
    tracing::info!("Server ready on http://{}", addr);

    // Bloquea el thread principal
    server.run()?;
    Ok(())
}
