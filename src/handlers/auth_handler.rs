use actix_web::{web, HttpResponse};

use crate::auth::jwt::TokenVerifier;
use crate::db::document_store::DocumentData;
use crate::db::users::UserRepository;
use crate::error::{ApiError, ApiResult};
use crate::models::common::ApiResponse;
use crate::models::user::{UserData, VerifiedUser, VerifyTokenRequest};

#[tracing::instrument(name = "Verify identity token", skip(request, verifier, users))]
pub async fn verify_token(
    request: web::Json<VerifyTokenRequest>,
    verifier: web::Data<dyn TokenVerifier>,
    users: web::Data<UserRepository>,
) -> ApiResult<HttpResponse> {
    let token = request
        .token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::validation("Token is required"))?;

    let verified = verifier.verify(token).await?;
    let user = users
        .get(&verified.uid)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    tracing::info!(uid = %verified.uid, "Token verified");
    Ok(HttpResponse::Ok().json(ApiResponse::success(VerifiedUser {
        uid: verified.uid,
        user,
    })))
}

#[tracing::instrument(name = "Get user data", skip(users))]
pub async fn get_user_data(
    user_id: String,
    users: web::Data<UserRepository>,
) -> ApiResult<HttpResponse> {
    let user = users
        .get(&user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserData { user })))
}

#[tracing::instrument(name = "Update user data", skip(fields, users))]
pub async fn update_user_data(
    user_id: String,
    fields: web::Json<DocumentData>,
    users: web::Data<UserRepository>,
) -> ApiResult<HttpResponse> {
    users.update(&user_id, fields.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success_message("User data updated")))
}
