//! Cross-origin policy: any origin, the API's methods, and the two request
//! headers clients need (`Authorization`, `Content-Type`).

use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS middleware. Preflight `OPTIONS` requests are answered
/// here and never reach a handler.
pub fn cors_policy() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(3600)
}
