use actix_web::{get, post, put, web, HttpResponse};

use crate::auth::jwt::TokenVerifier;
use crate::db::document_store::DocumentData;
use crate::db::users::UserRepository;
use crate::error::ApiResult;
use crate::handlers::auth_handler::{get_user_data, update_user_data, verify_token};
use crate::models::user::VerifyTokenRequest;

#[post("/verify-token")]
async fn verify(
    request: web::Json<VerifyTokenRequest>,
    verifier: web::Data<dyn TokenVerifier>,
    users: web::Data<UserRepository>,
) -> ApiResult<HttpResponse> {
    verify_token(request, verifier, users).await
}

#[get("/user-data/{user_id}")]
async fn user_data(
    path: web::Path<String>,
    users: web::Data<UserRepository>,
) -> ApiResult<HttpResponse> {
    get_user_data(path.into_inner(), users).await
}

#[put("/update-user/{user_id}")]
async fn update_user(
    path: web::Path<String>,
    fields: web::Json<DocumentData>,
    users: web::Data<UserRepository>,
) -> ApiResult<HttpResponse> {
    update_user_data(path.into_inner(), fields, users).await
}
