use actix_web::{get, web, Responder};

use crate::db::document_store::DocumentStore;
use crate::handlers::backend_health_handler::backend_health_check;

#[get("/health-check")]
async fn backend_health(store: web::Data<dyn DocumentStore>) -> impl Responder {
    backend_health_check(store).await
}
