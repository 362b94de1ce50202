//! Liveness route.

/// Body returned by the health routes.
pub const HEALTH_MESSAGE: &str = "Mini Image Gallery backend running";

/// GET / and GET /health
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}
