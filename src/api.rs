use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /bookmarks`. Fields stay loosely typed so that a rating such as
/// `"Eleventy"` reaches validation instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateBookmarkRequest {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub url: Option<Value>,
    pub rating: Option<Value>,
    pub description: Option<Value>,
}

/// Body of `PATCH /bookmarks/:id`. Unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateBookmarkRequest {
    pub title: Option<Value>,
    pub url: Option<Value>,
    pub rating: Option<Value>,
    pub description: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: ErrorMessage,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: ErrorMessage {
                message: message.into(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fields_deserialize_as_absent() {
        let req: CreateBookmarkRequest =
            serde_json::from_str(r#"{"id": 1, "title": null, "rating": "5"}"#).unwrap();
        assert_eq!(req.id, Some(Value::from(1)));
        assert!(req.title.is_none());
        assert!(req.url.is_none());
        assert_eq!(req.rating, Some(Value::from("5")));
    }

    #[test]
    fn test_error_response_shape() {
        let body = serde_json::to_value(ErrorResponse::new("Bookmark doesn't exist")).unwrap();
        assert_eq!(body, serde_json::json!({"error": {"message": "Bookmark doesn't exist"}}));
    }
}
