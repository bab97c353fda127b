use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::db::document_store::DocumentData;
use crate::db::health_data::HealthRecordRepository;
use crate::error::ApiResult;
use crate::handlers::health_data::{
    add_health_data, delete_health_data, get_health_data, get_health_summary, update_health_data,
};
use crate::models::health_data::{HealthDataQueryParams, NewHealthRecord};

#[post("/data")]
async fn add_data(
    data: web::Json<NewHealthRecord>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    add_health_data(data, repository).await
}

#[get("/data/{user_id}")]
async fn get_data(
    path: web::Path<String>,
    params: web::Query<HealthDataQueryParams>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    get_health_data(path.into_inner(), params, repository).await
}

#[put("/data/{doc_id}")]
async fn update_data(
    path: web::Path<String>,
    fields: web::Json<DocumentData>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    update_health_data(path.into_inner(), fields, repository).await
}

#[delete("/data/{doc_id}")]
async fn delete_data(
    path: web::Path<String>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    delete_health_data(path.into_inner(), repository).await
}

#[get("/summary/{user_id}")]
async fn get_summary(
    path: web::Path<String>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    get_health_summary(path.into_inner(), repository).await
}
