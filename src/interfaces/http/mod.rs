use crate::application::reconciler::WebhookReconciler;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use std::sync::Arc;

pub const SIGNATURE_HEADER: &str = "x-razorpay-signature";

#[derive(Clone)]
pub struct AppState {
    pub reconciler: Arc<WebhookReconciler>,
}

/// Builds the webhook router. The endpoint is registered for every method so
/// the reconciler can answer non-POST requests with its own 405 JSON body.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/razorpay-webhook", any(razorpay_webhook))
        .with_state(state)
}

async fn razorpay_webhook(
    State(state): State<AppState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = single_header_value(&headers, SIGNATURE_HEADER);
    let reply = state
        .reconciler
        .handle(method.as_str(), signature.as_deref(), &body)
        .await;
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(reply.body)).into_response()
}

/// Returns the header value only when it appears exactly once and is valid
/// UTF-8. A repeated signature header is treated the same as a missing one.
fn single_header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let mut values = headers.get_all(name).iter();
    let first = values.next()?;
    if values.next().is_some() {
        return None;
    }
    first.to_str().ok().map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_header_value() {
        let mut headers = HeaderMap::new();
        assert_eq!(single_header_value(&headers, SIGNATURE_HEADER), None);

        headers.append(SIGNATURE_HEADER, "abc123".parse().unwrap());
        assert_eq!(
            single_header_value(&headers, SIGNATURE_HEADER),
            Some("abc123".to_string())
        );

        // A repeated header must not be accepted
        headers.append(SIGNATURE_HEADER, "def456".parse().unwrap());
        assert_eq!(single_header_value(&headers, SIGNATURE_HEADER), None);
    }
}
