use actix_web::{web, HttpResponse};

use crate::db::document_store::DocumentData;
use crate::db::health_data::HealthRecordRepository;
use crate::db::query_builder::build_health_query;
use crate::error::ApiResult;
use crate::models::common::ApiResponse;
use crate::models::health_data::{
    HealthDataQueryParams, HealthRecordCreated, HealthRecordList, NewHealthRecord,
};

#[tracing::instrument(name = "Add health data", skip(data, repository))]
pub async fn add_health_data(
    data: web::Json<NewHealthRecord>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    let doc_id = repository.add(data.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::success(HealthRecordCreated {
        message: "Health data saved".to_string(),
        doc_id,
    })))
}

#[tracing::instrument(name = "Get health data", skip(params, repository))]
pub async fn get_health_data(
    user_id: String,
    params: web::Query<HealthDataQueryParams>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    let spec = build_health_query(&user_id, &params)?;
    let data = repository.list(&spec).await?;
    tracing::debug!("Found {} health records", data.len());

    Ok(HttpResponse::Ok().json(ApiResponse::success(HealthRecordList {
        count: data.len(),
        data,
    })))
}

#[tracing::instrument(name = "Update health data", skip(fields, repository))]
pub async fn update_health_data(
    doc_id: String,
    fields: web::Json<DocumentData>,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    repository.update(&doc_id, fields.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_message("Health data updated")))
}

#[tracing::instrument(name = "Delete health data", skip(repository))]
pub async fn delete_health_data(
    doc_id: String,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    repository.delete(&doc_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_message("Health data deleted")))
}

#[tracing::instrument(name = "Get health summary", skip(repository))]
pub async fn get_health_summary(
    user_id: String,
    repository: web::Data<HealthRecordRepository>,
) -> ApiResult<HttpResponse> {
    let summary = repository.summarize(&user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
