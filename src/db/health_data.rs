use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::db::document_store::{Document, DocumentData, DocumentStore, StoreError};
use crate::db::query_builder::summary_query;
use crate::error::{ApiError, ApiResult};
use crate::models::health_data::{
    format_timestamp, normalize_field_name, HealthQuerySpec, HealthRecord, HealthSummary,
    NewHealthRecord, HEALTH_DATA_COLLECTION, IMMUTABLE_FIELDS, METRIC_FIELDS, UPDATED_AT_FIELD,
};
use crate::utils::health_calculations::summarize_records;

/// Health record operations on top of the document store.
///
/// `update` relies on the store's native semantics: a missing document is
/// reported by the store as not found rather than checked up front. `delete`
/// is idempotent.
#[derive(Clone)]
pub struct HealthRecordRepository {
    store: Arc<dyn DocumentStore>,
}

fn decode_record(document: Document) -> Result<HealthRecord, StoreError> {
    let mut record: HealthRecord = serde_json::from_value(Value::Object(document.data))
        .map_err(|e| StoreError::InvalidDocument(format!("health record {}: {}", document.id, e)))?;
    record.id = document.id;
    Ok(record)
}

fn encode_record(record: &HealthRecord) -> Result<DocumentData, StoreError> {
    match serde_json::to_value(record) {
        Ok(Value::Object(data)) => Ok(data),
        Ok(other) => Err(StoreError::InvalidDocument(format!(
            "health record encoded as {}",
            other
        ))),
        Err(e) => Err(StoreError::InvalidDocument(e.to_string())),
    }
}

impl HealthRecordRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    #[tracing::instrument(name = "Add health record", skip(self, new_record))]
    pub async fn add(&self, new_record: NewHealthRecord) -> ApiResult<String> {
        let user_id = new_record
            .user_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::validation("User ID is required"))?;

        let record = HealthRecord {
            id: String::new(),
            user_id: user_id.to_string(),
            steps: new_record.steps.unwrap_or_default(),
            heart_rate: new_record.heart_rate.unwrap_or_default(),
            sleep_hours: new_record.sleep_hours.unwrap_or_default(),
            water_intake: new_record.water_intake.unwrap_or_default(),
            calories: new_record.calories.unwrap_or_default(),
            created_at: Some(Utc::now()),
            updated_at: None,
            extra: Map::new(),
        };

        let id = self
            .store
            .add(HEALTH_DATA_COLLECTION, encode_record(&record)?)
            .await?;
        tracing::info!(doc_id = %id, user_id = %record.user_id, "Health record stored");
        Ok(id)
    }

    #[tracing::instrument(name = "List health records", skip(self), fields(user_id = %spec.user_id))]
    pub async fn list(&self, spec: &HealthQuerySpec) -> ApiResult<Vec<HealthRecord>> {
        let documents = self.store.run_query(&spec.to_query()).await?;
        let records = documents
            .into_iter()
            .map(decode_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    #[tracing::instrument(name = "Update health record", skip(self, fields))]
    pub async fn update(&self, id: &str, fields: DocumentData) -> ApiResult<()> {
        let mut patch = DocumentData::new();
        for (field, value) in fields {
            let field = normalize_field_name(&field).to_string();
            if IMMUTABLE_FIELDS.contains(&field.as_str()) {
                return Err(ApiError::validation(format!("{} cannot be updated", field)));
            }
            if METRIC_FIELDS.contains(&field.as_str()) && !(value.is_number() || value.is_null()) {
                return Err(ApiError::validation(format!("{} must be a number", field)));
            }
            patch.insert(field, value);
        }
        patch.insert(
            UPDATED_AT_FIELD.to_string(),
            Value::String(format_timestamp(&Utc::now())),
        );

        self.store.update(HEALTH_DATA_COLLECTION, id, patch).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Delete health record", skip(self))]
    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        self.store.delete(HEALTH_DATA_COLLECTION, id).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Summarize health records", skip(self))]
    pub async fn summarize(&self, user_id: &str) -> ApiResult<HealthSummary> {
        let records = self.list(&summary_query(user_id)).await?;
        Ok(summarize_records(&records))
    }
}
