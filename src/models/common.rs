use serde::Serialize;

/// Success envelope used across all handlers: `{"success": true, ...payload}`.
///
/// Failures never go through this type; they are rendered by
/// [`crate::error::ApiError`] as `{"error": "..."}`.
#[derive(Debug, Serialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

/// Payload made of a single human readable message
#[derive(Debug, Serialize, Clone)]
pub struct MessagePayload {
    pub message: String,
}

impl ApiResponse<MessagePayload> {
    pub fn success_message(message: impl Into<String>) -> Self {
        Self::success(MessagePayload {
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Count {
        count: usize,
    }

    #[test]
    fn test_payload_is_flattened() {
        let body = serde_json::to_value(ApiResponse::success(Count { count: 3 })).unwrap();
        assert_eq!(body, json!({ "success": true, "count": 3 }));
    }

    #[test]
    fn test_success_message() {
        let body = serde_json::to_value(ApiResponse::success_message("done")).unwrap();
        assert_eq!(body, json!({ "success": true, "message": "done" }));
    }
}
