use serde::{Deserialize, Serialize};

use crate::db::document_store::DocumentData;

pub const USERS_COLLECTION: &str = "users";

/// Profile document owned by the identity side; kept free-form.
pub type UserProfile = DocumentData;

#[derive(Debug, Deserialize)]
pub struct VerifyTokenRequest {
    #[serde(default)]
    pub token: Option<String>,
}

/// Claims carried by identity tokens.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: usize,
    #[serde(default)]
    pub iat: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifiedUser {
    pub uid: String,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: UserProfile,
}
