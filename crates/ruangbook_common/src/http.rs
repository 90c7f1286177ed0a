// --- File: crates/ruangbook_common/src/http.rs ---
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{HttpStatusCode, RuangbookError};

/// Extension trait for RuangbookError to convert it to an Axum HTTP response.
pub trait IntoHttpResponse {
    /// Converts the error into an Axum HTTP response.
    fn into_http_response(self) -> Response;
}

impl IntoHttpResponse for RuangbookError {
    fn into_http_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("request failed: {}", self);
        }

        let mut error_body = json!({
            "message": self.to_string(),
            "code": status_code.as_u16(),
        });
        if let Some(fields) = self.fields() {
            error_body["fields"] = json!(fields);
        }

        (status_code, Json(json!({ "error": error_body }))).into_response()
    }
}

/// Implement IntoResponse for RuangbookError to make it easier to use in Axum handlers.
impl IntoResponse for RuangbookError {
    fn into_response(self) -> Response {
        self.into_http_response()
    }
}

/// JSON body extractor whose rejections use the error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(RuangbookError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the error envelope.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(RuangbookError))]
pub struct ApiQuery<T>(pub T);

impl From<JsonRejection> for RuangbookError {
    fn from(rejection: JsonRejection) -> Self {
        RuangbookError::ParseError(rejection.body_text())
    }
}

impl From<QueryRejection> for RuangbookError {
    fn from(rejection: QueryRejection) -> Self {
        RuangbookError::ParseError(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldError;

    #[test]
    fn field_errors_produce_bad_request() {
        let response = RuangbookError::FieldValidation(vec![FieldError::new(
            "booker_name",
            "Nama minimal 2 karakter",
        )])
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[derive(Debug, serde::Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        count: i64,
    }

    async fn envelope(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn json_rejection_uses_error_envelope() {
        let request = axum::http::Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"count":"5"}"#))
            .unwrap();
        let rejection = ApiJson::<Payload>::from_request(request, &()).await.unwrap_err();
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = envelope(response).await;
        assert_eq!(body["error"]["code"], 400);
        assert!(body["error"]["message"].as_str().unwrap().contains("count"));
    }

    #[tokio::test]
    async fn query_rejection_uses_error_envelope() {
        let request = axum::http::Request::builder()
            .uri("/?count=lima")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let rejection = ApiQuery::<Payload>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        let response = rejection.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(envelope(response).await["error"]["code"], 400);
    }
}
