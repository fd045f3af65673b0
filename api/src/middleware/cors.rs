//! CORS configuration for the API.

use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware from the `CORS_ALLOWED_ORIGINS` environment
/// variable (comma-separated). Without it, any origin is accepted, which
/// is intended for local development only.
pub fn create_cors() -> Cors {
    let base = Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
        .max_age(3600);

    match std::env::var("CORS_ALLOWED_ORIGINS") {
        Ok(origins) => origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .fold(base, |cors, origin| cors.allowed_origin(origin)),
        Err(_) => base.allow_any_origin(),
    }
}
