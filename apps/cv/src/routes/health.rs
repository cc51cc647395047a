/// GET /health
/// Liveness only: a fixed plaintext acknowledgment.
pub async fn health_handler() -> &'static str {
    "Backend OK"
}
