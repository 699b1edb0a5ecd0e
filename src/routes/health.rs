use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::state::AppState;

/// GET /health - Liveness, does not touch the store
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.config.store_backend,
        "uptime_seconds": state.uptime_seconds(),
    }))
}
