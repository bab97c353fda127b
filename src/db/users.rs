use std::sync::Arc;

use crate::db::document_store::{DocumentData, DocumentStore};
use crate::error::ApiResult;
use crate::models::user::{UserProfile, USERS_COLLECTION};

/// Read and patch access to profiles owned by the identity side.
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Fetch user profile", skip(self))]
    pub async fn get(&self, user_id: &str) -> ApiResult<Option<UserProfile>> {
        let document = self.store.get(USERS_COLLECTION, user_id).await?;
        Ok(document.map(|doc| doc.data))
    }

    /// Partial merge into an existing profile; unknown users are not found.
    #[tracing::instrument(name = "Update user profile", skip(self, fields))]
    pub async fn update(&self, user_id: &str, fields: DocumentData) -> ApiResult<()> {
        self.store.update(USERS_COLLECTION, user_id, fields).await?;
        Ok(())
    }
}
