use actix_web::{get, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

/// API banner, mounted at the root of the `/api` scope.
#[get("/")]
pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Taskvault API"
    }))
}

/// Liveness endpoint, mounted outside the `/api` scope.
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "timestamp": Utc::now()
    }))
}
