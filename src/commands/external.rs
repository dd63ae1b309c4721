//! # Comandos Externos
//! src/commands/external.rs
//!
//! - /chuck-norris-joke: Reenvía la respuesta de la API de chistes configurada
//!
//! El cliente HTTP vive en `AppContext` y ya tiene configurado el timeout
//! saliente; cualquier fallo (conexión, timeout, status no 2xx) es un 500.

use crate::context::AppContext;
use crate::http::{Request, Response, StatusCode};

/// Body y Content-Type devueltos por la API
struct Upstream {
    content_type: Option<String>,
    body: String,
}

fn fetch(ctx: &AppContext) -> Result<Upstream, reqwest::Error> {
    let response = ctx.http_client.get(&ctx.joke_url).send()?.error_for_status()?;

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Ok(Upstream {
        content_type,
        body: response.text()?,
    })
}

/// Handler para /chuck-norris-joke
pub fn chuck_norris_joke_handler(_req: &Request, ctx: &AppContext) -> Response {
    match fetch(ctx) {
        Ok(upstream) => {
            let content_type = upstream
                .content_type
                .unwrap_or_else(|| "text/plain; charset=utf-8".to_string());

            Response::new(StatusCode::Ok)
                .with_header("Content-Type", &content_type)
                .with_body(&upstream.body)
        }
        Err(e) => {
            tracing::error!("Error fetching joke from {}: {}", ctx.joke_url, e);
            Response::error(StatusCode::InternalServerError, "Error fetching joke")
        }
    }
}
