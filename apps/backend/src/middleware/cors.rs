use actix_cors::Cors;

/// Wildcard CORS policy: any origin, method and request header is accepted,
/// all response headers are exposed and credentials are allowed. The
/// request origin is echoed rather than answered with `*` so credentialed
/// browser requests still work.
pub fn cors_middleware() -> Cors {
    Cors::permissive().max_age(3600)
}
