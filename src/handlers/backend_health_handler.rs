use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::db::document_store::DocumentStore;

pub async fn backend_health_check(store: web::Data<dyn DocumentStore>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "OK",
            "message": "Backend is running"
        })),
        Err(e) => {
            tracing::error!("Document store unreachable: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "DEGRADED",
                "message": "Document store unreachable"
            }))
        }
    }
}
