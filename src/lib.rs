//! # Utility HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.0 concurrente con utilidades de filesystem: listar un
//! directorio, contar ocurrencias de una palabra en un archivo y descargar
//! una carpeta comprimida en zip.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `fsutil`: Núcleo de filesystem (resolver, listado, conteo, zip)
//! - `http`: Parsing y manejo del protocolo HTTP/1.0
//! - `server`: Lógica del servidor TCP y manejo de conexiones
//! - `router`: Enrutamiento de peticiones a handlers
//! - `commands`: Handlers de cada endpoint
//! - `context`: Estado compartido por los handlers
//! - `config`, `logging`, `error`: Arranque del proceso
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use utility_server::config::Config;
//! use utility_server::server::Server;
//!
//! let mut server = Server::new(Config::default()).expect("Error al crear servidor");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod fsutil;
pub mod http;
pub mod logging;
pub mod router;
pub mod server;
