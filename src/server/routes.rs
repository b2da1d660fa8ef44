//! HTTP route handlers

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use serde_json::json;
use teloxide::types::Update;
use tracing::{error, info, warn};

use super::AppState;
use crate::utils::logging::log_rejected_delivery;

pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Constant-time comparison of the presented secret
fn secret_matches(headers: &HeaderMap, expected: &str) -> bool {
    let Some(provided) = headers.get(SECRET_TOKEN_HEADER).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let (a, b) = (provided.as_bytes(), expected.as_bytes());
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime_seconds": state.started_at.elapsed().as_secs_f64(),
    }))
}

/// POST /webhook
///
/// The body is parsed only after the secret check so an unauthenticated
/// caller always gets 401, whatever it sent.
pub async fn receive_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(ref expected) = state.webhook_secret {
        if !secret_matches(&headers, expected) {
            let remote = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok());
            log_rejected_delivery("invalid secret token", remote);
            return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
        }
    }

    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Malformed update body");
            return error_response(StatusCode::BAD_REQUEST, "Invalid update");
        }
    };

    let update_id = update.id.0;
    match state.dispatcher.dispatch(update).await {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => {
            error!(
                error = %e,
                severity = %e.severity(),
                recoverable = e.is_recoverable(),
                context = "webhook",
                update_id = update_id,
                "Failed to handle update"
            );
            state.events.publish_error(&e, "webhook");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

/// POST /set-webhook
pub async fn set_webhook(State(state): State<AppState>) -> Response {
    let Some(ref url) = state.webhook_url else {
        return error_response(StatusCode::BAD_REQUEST, "Webhook URL not configured");
    };

    match state
        .telegram
        .set_webhook(url, state.webhook_secret.as_deref(), false)
        .await
    {
        Ok(()) => {
            info!(webhook_url = %url, "Webhook set through admin route");
            Json(json!({
                "ok": true,
                "webhookUrl": url,
                "message": "Webhook set successfully",
            }))
            .into_response()
        }
        Err(e) => {
            state.events.publish_error(&e, "set-webhook");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to set webhook")
        }
    }
}

/// DELETE /webhook
pub async fn delete_webhook(State(state): State<AppState>) -> Response {
    match state.telegram.delete_webhook(false).await {
        Ok(()) => Json(json!({
            "ok": true,
            "message": "Webhook deleted successfully",
        }))
        .into_response(),
        Err(e) => {
            state.events.publish_error(&e, "delete-webhook");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete webhook")
        }
    }
}

/// GET /webhook-info
pub async fn webhook_info(State(state): State<AppState>) -> Response {
    let info = match state.telegram.webhook_info().await {
        Ok(info) => info,
        Err(e) => {
            state.events.publish_error(&e, "get-webhook-info");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get webhook info");
        }
    };

    match serde_json::to_value(&info) {
        Ok(value) => Json(value).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to serialize webhook info");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to get webhook info")
        }
    }
}

pub async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_secret_matches() {
        let mut headers = HeaderMap::new();
        assert!(!secret_matches(&headers, "s3cret"));

        headers.insert(SECRET_TOKEN_HEADER, HeaderValue::from_static("s3cret"));
        assert!(secret_matches(&headers, "s3cret"));
        assert!(!secret_matches(&headers, "s3cre"));
        assert!(!secret_matches(&headers, "S3cret"));
    }
}
