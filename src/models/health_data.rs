use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::db::document_store::OrderDirection;

pub const HEALTH_DATA_COLLECTION: &str = "health_data";
pub const USER_ID_FIELD: &str = "userId";
pub const CREATED_AT_FIELD: &str = "createdAt";
pub const UPDATED_AT_FIELD: &str = "updatedAt";

/// Fields a partial update may never touch.
pub const IMMUTABLE_FIELDS: [&str; 3] = ["id", USER_ID_FIELD, CREATED_AT_FIELD];

/// Stored metric names; their values must stay numeric (or null).
pub const METRIC_FIELDS: [&str; 5] = ["steps", "heartRate", "sleepHours", "waterIntake", "calories"];

/// One tracked health entry as stored and returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub user_id: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub steps: i64,
    #[serde(default, deserialize_with = "deserialize_metric")]
    pub heart_rate: f64,
    #[serde(default, deserialize_with = "deserialize_metric")]
    pub sleep_hours: f64,
    #[serde(default, deserialize_with = "deserialize_metric")]
    pub water_intake: f64,
    #[serde(default, deserialize_with = "deserialize_metric")]
    pub calories: f64,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", serialize_with = "serialize_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Extra fields attached through partial updates
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /api/health/data`. Absent metrics default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthRecord {
    #[serde(default, alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_count")]
    pub steps: Option<i64>,
    #[serde(default, alias = "heart_rate")]
    pub heart_rate: Option<f64>,
    #[serde(default, alias = "sleep_hours")]
    pub sleep_hours: Option<f64>,
    #[serde(default, alias = "water_intake")]
    pub water_intake: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
}

/// Query string of `GET /api/health/data/{userId}`. Values stay raw so the
/// query builder decides how to validate them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HealthDataQueryParams {
    #[serde(default, rename = "orderBy", alias = "order_by")]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Validated history query for one user.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthQuerySpec {
    pub user_id: String,
    pub order_by: String,
    pub direction: OrderDirection,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub total_steps: i64,
    pub total_sleep: f64,
    pub avg_heart_rate: f64,
    pub total_water: f64,
    pub total_calories: f64,
    pub days_tracked: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecordCreated {
    pub message: String,
    pub doc_id: String,
}

#[derive(Debug, Serialize)]
pub struct HealthRecordList {
    pub data: Vec<HealthRecord>,
    pub count: usize,
}

/// Map legacy snake_case metric names onto the stored camelCase ones.
pub fn normalize_field_name(field: &str) -> &str {
    match field {
        "user_id" => USER_ID_FIELD,
        "heart_rate" => "heartRate",
        "sleep_hours" => "sleepHours",
        "water_intake" => "waterIntake",
        "created_at" | "timestamp" => CREATED_AT_FIELD,
        "updated_at" => UPDATED_AT_FIELD,
        other => other,
    }
}

/// Fixed-width RFC 3339 so timestamps sort correctly as strings.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

fn serialize_timestamp<S>(timestamp: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match timestamp {
        Some(ts) => serializer.serialize_str(&format_timestamp(ts)),
        None => serializer.serialize_none(),
    }
}

fn number_to_count<E: serde::de::Error>(value: Value) -> Result<Option<i64>, E> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .map(Some)
            .ok_or_else(|| E::custom(format!("invalid count: {}", n))),
        other => Err(E::custom(format!("expected a number, got {}", other))),
    }
}

/// Counts accept any JSON number; fractional values are rounded.
fn deserialize_count<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    number_to_count(Value::deserialize(deserializer)?).map(Option::unwrap_or_default)
}

fn deserialize_optional_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    number_to_count(Value::deserialize(deserializer)?)
}

/// Null metrics read as zero.
fn deserialize_metric<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_default())
}
