//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea paths HTTP a handlers.
//!
//! ```text
//! Request → Router → Handler(&Request, &AppContext) → Response
//! ```
//!
//! Las rutas exactas tienen prioridad sobre las de prefijo (ej: `/color/`,
//! que recibe el nombre del color como resto del path). Sin coincidencia
//! se retorna 404.

use crate::context::AppContext;
use crate::http::{Request, Response, StatusCode};
use std::sync::Arc;

/// Un handler recibe el request y el contexto compartido
pub type Handler = fn(&Request, &AppContext) -> Response;

enum Route {
    Exact(String),
    Prefix(String),
}

/// Router que mapea paths a handlers
pub struct Router {
    routes: Vec<(Route, Handler)>,
    context: Arc<AppContext>,
}

impl Router {
    /// Router vacío que pasa `context` a cada handler
    pub fn new(context: Arc<AppContext>) -> Self {
        Self {
            routes: Vec::new(),
            context,
        }
    }

    /// Registra una ruta exacta
    pub fn register(&mut self, path: &str, handler: Handler) {
        self.routes.push((Route::Exact(path.to_string()), handler));
    }

    /// Registra una ruta que acepta cualquier path que empiece con `prefix`
    pub fn register_prefix(&mut self, prefix: &str, handler: Handler) {
        self.routes.push((Route::Prefix(prefix.to_string()), handler));
    }

    /// Ejecuta el handler que corresponde al path del request
    pub fn route(&self, request: &Request) -> Response {
        let path = request.path();

        let handler = self
            .routes
            .iter()
            .find(|(route, _)| matches!(route, Route::Exact(p) if p == path))
            .or_else(|| {
                self.routes
                    .iter()
                    .find(|(route, _)| matches!(route, Route::Prefix(p) if path.starts_with(p.as_str())))
            })
            .map(|(_, handler)| *handler);

        let mut response = match handler {
            Some(handler) => handler(request, &self.context),
            None => Response::error(StatusCode::NotFound, &format!("Route not found: {}", path)),
        };

        self.add_common_headers(&mut response);
        response
    }

    fn add_common_headers(&self, response: &mut Response) {
        response.add_header("Server", "Utility-HTTP/1.0");
        response.add_header("Connection", "close");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn test_handler(_req: &Request, _ctx: &AppContext) -> Response {
        Response::json(r#"{"test": "ok"}"#)
    }

    fn echo_rest_handler(req: &Request, _ctx: &AppContext) -> Response {
        Response::text(req.path().trim_start_matches("/items/"))
    }

    fn router() -> Router {
        Router::new(Arc::new(AppContext::from_config(&Config::default()).unwrap()))
    }

    fn get(router: &Router, raw: &[u8]) -> Response {
        router.route(&Request::parse(raw).unwrap())
    }

    #[test]
    fn test_register_route() {
        let mut router = router();
        assert_eq!(get(&router, b"GET /test HTTP/1.0\r\n\r\n").status(), StatusCode::NotFound);

        router.register("/test", test_handler);
        assert_eq!(get(&router, b"GET /test HTTP/1.0\r\n\r\n").status(), StatusCode::Ok);
    }

    #[test]
    fn test_route_found() {
        let mut router = router();
        router.register("/test", test_handler);

        let response = get(&router, b"GET /test HTTP/1.0\r\n\r\n");
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.headers().get("Connection"), Some(&"close".to_string()));
    }

    #[test]
    fn test_route_not_found() {
        let router = router();

        let response = get(&router, b"GET /nonexistent HTTP/1.0\r\n\r\n");
        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(String::from_utf8_lossy(response.body()).contains("Route not found"));
    }

    #[test]
    fn test_prefix_route() {
        let mut router = router();
        router.register_prefix("/items/", echo_rest_handler);

        let response = get(&router, b"GET /items/blue HTTP/1.0\r\n\r\n");
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.body(), b"blue");
    }

    #[test]
    fn test_exact_route_wins_over_prefix() {
        let mut router = router();
        router.register_prefix("/items/", echo_rest_handler);
        router.register("/items/all", test_handler);

        let response = get(&router, b"GET /items/all HTTP/1.0\r\n\r\n");
        assert_eq!(response.body(), br#"{"test": "ok"}"#);
    }
}
