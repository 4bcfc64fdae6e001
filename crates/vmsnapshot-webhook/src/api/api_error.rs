use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::warn;

/// Returned when the body of a request is not an AdmissionReview.
///
/// The API server only expects AdmissionReview answers from a webhook, so
/// this is an HTTP level error and never an AdmissionResponse.
#[derive(Debug)]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: format!("cannot decode AdmissionReview: {}", rejection.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        warn!(
            status = self.status.as_u16(),
            error = self.message.as_str(),
            "rejected request"
        );

        let payload = json!({
            "message": self.message,
            "status": self.status.as_u16(),
        });

        (self.status, axum::Json(payload)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn error_payload() {
        let error = ApiError {
            status: StatusCode::BAD_REQUEST,
            message: "cannot decode AdmissionReview: EOF".to_owned(),
        };

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            serde_json::from_slice(&response.into_body().collect().await.unwrap().to_bytes())
                .unwrap();
        assert_eq!(
            body,
            json!({"message": "cannot decode AdmissionReview: EOF", "status": 400})
        );
    }
}
