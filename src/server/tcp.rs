//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Servidor HTTP/1.0 que maneja múltiples conexiones simultáneas usando
//! threads. Cada conexión se procesa en su propio thread y atiende un
//! único request.

use crate::commands;
use crate::config::Config;
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Method, Request, Response, StatusCode};
use crate::router::Router;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Tamaño máximo aceptado para un request (headers + body)
const MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Tiempo máximo esperando bytes del cliente
const READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Contador global para que los request ids no se repitan
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Servidor HTTP/1.0 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    /// Construye el contexto compartido y registra todas las rutas
    pub fn new(config: Config) -> Result<Self> {
        let context = Arc::new(AppContext::from_config(&config)?);
        let router = Self::build_router(context);

        Ok(Self {
            config,
            router: Arc::new(router),
            listener: None,
        })
    }

    /// Router con todos los endpoints del servidor
    pub fn build_router(context: Arc<AppContext>) -> Router {
        let mut router = Router::new(context);

        // Filesystem
        router.register("/list-files", commands::list_files_handler);
        router.register("/count-word", commands::count_word_handler);
        router.register("/zip-folder", commands::zip_folder_handler);

        // Utilidades
        router.register("/hello", commands::hello_handler);
        router.register("/diffdates", commands::diffdates_handler);
        router.register("/validate-spanish-phone", commands::validate_phone_handler);
        router.register("/validate-spanish-dni", commands::validate_dni_handler);
        router.register("/parse-url", commands::parse_url_handler);
        router.register("/help", commands::help_handler);
        router.register_prefix("/color/", commands::color_handler);

        // Servicios externos
        router.register("/chuck-norris-joke", commands::chuck_norris_joke_handler);

        router
    }

    /// Abre el socket de escucha y retorna la dirección real
    ///
    /// Con `--port 0` el SO asigna un puerto libre.
    pub fn bind(&mut self) -> io::Result<SocketAddr> {
        let listener = TcpListener::bind(self.config.address())?;
        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Acepta conexiones indefinidamente, un thread por conexión
    pub fn run(&mut self) -> io::Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = self
            .listener
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "listener not bound"))?;

        tracing::info!("Listening on {} (one thread per connection)", listener.local_addr()?);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    tracing::debug!("New connection from {}", peer_addr);

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, &router) {
                            tracing::warn!("Connection from {} failed: {}", peer_addr, e);
                        }
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to accept connection: {}", e);
                }
            }
        }

        Ok(())
    }

    fn handle_connection(mut stream: TcpStream, router: &Router) -> io::Result<()> {
        let start = Instant::now();
        let request_id = next_request_id();
        let thread_id = format!("{:?}", thread::current().id());

        stream.set_read_timeout(Some(READ_TIMEOUT))?;
        let raw = read_request(&mut stream)?;

        if raw.is_empty() {
            tracing::debug!("Connection closed without data");
            return Ok(());
        }

        let (mut response, label, head_only) = match Request::parse(&raw) {
            Ok(request) => {
                let label = format!("{} {}", request.method().as_str(), request.path());
                tracing::info!("[{}] {}", &request_id[..8], label);
                (router.route(&request), label, request.method() == Method::HEAD)
            }
            Err(e) => {
                tracing::warn!("[{}] Parse error: {}", &request_id[..8], e);
                let mut response = Response::error(StatusCode::BadRequest, &format!("Invalid request: {}", e));
                response.add_header("Server", "Utility-HTTP/1.0");
                response.add_header("Connection", "close");
                (response, "<invalid>".to_string(), false)
            }
        };

        response.add_header("X-Request-Id", &request_id);
        response.add_header("X-Worker-Thread", &thread_id);

        let mut bytes = response.to_bytes();
        if head_only {
            // HEAD: mismos headers, sin body
            bytes.truncate(bytes.len() - response.body().len());
        }

        stream.write_all(&bytes)?;
        stream.flush()?;

        tracing::info!(
            "[{}] {} -> {} ({:.2}ms)",
            &request_id[..8],
            label,
            response.status(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        Ok(())
    }
}

/// Lee hasta el fin de los headers, más el body si trae `Content-Length`
///
/// Se corta en EOF o al llegar a `MAX_REQUEST_BYTES`.
fn read_request(stream: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut raw = Vec::new();
    let mut buffer = [0u8; 8192];

    loop {
        let n = stream.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        raw.extend_from_slice(&buffer[..n]);

        if raw.len() >= MAX_REQUEST_BYTES {
            raw.truncate(MAX_REQUEST_BYTES);
            break;
        }

        if let Some(head_end) = find_head_end(&raw) {
            // Content-Length viene del cliente: no puede desbordar, y un body
            // mayor que el límite no se espera
            let expected = head_end.saturating_add(content_length(&raw[..head_end]));
            if raw.len() >= expected || expected > MAX_REQUEST_BYTES {
                break;
            }
        }
    }

    Ok(raw)
}

/// Posición donde termina `\r\n\r\n`
fn find_head_end(raw: &[u8]) -> Option<usize> {
    raw.windows(4).position(|w| w == b"\r\n\r\n").map(|pos| pos + 4)
}

fn content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0)
}

/// Id de 16 dígitos hex, distinto para cada request del proceso
fn next_request_id() -> String {
    let mut hasher = DefaultHasher::new();
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default()
        .hash(&mut hasher);
    thread::current().id().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}
