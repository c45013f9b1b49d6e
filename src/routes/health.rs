use actix_web::HttpResponse;

/// Liveness probe. Does not touch the SMTP server.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
