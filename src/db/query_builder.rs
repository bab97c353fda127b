//! Turns request parameters into validated health-history queries.

use crate::db::document_store::{OrderDirection, Query};
use crate::error::{ApiError, ApiResult};
use crate::models::health_data::{
    normalize_field_name, HealthDataQueryParams, HealthQuerySpec, CREATED_AT_FIELD,
    HEALTH_DATA_COLLECTION, USER_ID_FIELD,
};

pub const DEFAULT_LIMIT: usize = 50;

/// How many of the most recent records feed the summary.
pub const SUMMARY_WINDOW: usize = 30;

/// Anything other than `asc` sorts descending.
pub fn parse_direction(order: Option<&str>) -> OrderDirection {
    match order.map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("asc") => OrderDirection::Ascending,
        _ => OrderDirection::Descending,
    }
}

pub fn parse_limit(limit: Option<&str>) -> ApiResult<usize> {
    let raw = match limit.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_LIMIT),
        Some(raw) => raw,
    };

    match raw.parse::<usize>() {
        Ok(0) => Err(ApiError::validation("limit must be a positive integer")),
        Ok(limit) => Ok(limit),
        Err(_) => Err(ApiError::validation(format!(
            "limit must be a positive integer, got '{}'",
            raw
        ))),
    }
}

pub fn build_health_query(user_id: &str, params: &HealthDataQueryParams) -> ApiResult<HealthQuerySpec> {
    let user_id = user_id.trim();
    if user_id.is_empty() {
        return Err(ApiError::validation("User ID is required"));
    }

    let order_by = params
        .order_by
        .as_deref()
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(normalize_field_name)
        .unwrap_or(CREATED_AT_FIELD)
        .to_string();

    Ok(HealthQuerySpec {
        user_id: user_id.to_string(),
        order_by,
        direction: parse_direction(params.order.as_deref()),
        limit: parse_limit(params.limit.as_deref())?,
    })
}

/// The most recent [`SUMMARY_WINDOW`] records of a user.
pub fn summary_query(user_id: &str) -> HealthQuerySpec {
    HealthQuerySpec {
        user_id: user_id.to_string(),
        order_by: CREATED_AT_FIELD.to_string(),
        direction: OrderDirection::Descending,
        limit: SUMMARY_WINDOW,
    }
}

impl HealthQuerySpec {
    pub fn to_query(&self) -> Query {
        Query::collection(HEALTH_DATA_COLLECTION)
            .where_eq(USER_ID_FIELD, self.user_id.as_str())
            .order_by(self.order_by.as_str(), self.direction)
            .limit(self.limit)
    }
}
