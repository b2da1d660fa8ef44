//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path_regex},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Value for `bot.api_url`; the client appends `/bot<token>/<method>`
    pub fn api_url(&self) -> String {
        self.server.uri()
    }

    fn endpoint(method_name: &str) -> String {
        format!("/bot{}/{}", TEST_BOT_TOKEN, method_name)
    }

    /// teloxide capitalizes method names (`SendMessage`), Telegram does not care
    fn route(method_name: &str) -> wiremock::matchers::PathRegexMatcher {
        path_regex(format!("(?i)^{}$", regex::escape(&Self::endpoint(method_name))))
    }

    fn is_call_to(request: &wiremock::Request, method_name: &str) -> bool {
        request
            .url
            .path()
            .eq_ignore_ascii_case(&Self::endpoint(method_name))
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self) {
        let response_body = json!({
            "ok": true,
            "result": {
                "message_id": 123,
                "from": {
                    "id": 12345,
                    "is_bot": true,
                    "first_name": "TestBot",
                    "username": "test_bot"
                },
                "chat": {
                    "id": 42,
                    "first_name": "Test",
                    "type": "private"
                },
                "date": 1640995200,
                "text": "Test message"
            }
        });

        Mock::given(method("POST"))
            .and(Self::route("sendMessage"))
            .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
            .mount(&self.server)
            .await;
    }

    /// Make sendMessage fail with a Bot API error
    pub async fn mock_send_message_failure(&self) {
        Mock::given(method("POST"))
            .and(Self::route("sendMessage"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint whose result is a plain `true`
    pub async fn mock_true(&self, method_name: &str) {
        Mock::given(method("POST"))
            .and(Self::route(method_name))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": true })),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_get_webhook_info(&self, url: &str) {
        Mock::given(method("POST"))
            .and(Self::route("getWebhookInfo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "result": {
                    "url": url,
                    "has_custom_certificate": false,
                    "pending_update_count": 3
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup the mocks every happy-path test needs
    pub async fn setup_default_mocks(&self) {
        self.mock_send_message().await;
        self.mock_true("answerCallbackQuery").await;
        self.mock_true("setWebhook").await;
        self.mock_true("deleteWebhook").await;
        self.mock_true("setMyCommands").await;
    }

    /// Reset all mocks
    pub async fn reset(&self) {
        self.server.reset().await;
    }

    /// JSON bodies received by one Bot API method, in arrival order
    pub async fn requests_to(&self, method_name: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| Self::is_call_to(request, method_name))
            .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
            .collect()
    }

    /// Raw bodies received by one Bot API method; multipart calls such as
    /// setWebhook are not JSON
    pub async fn raw_requests_to(&self, method_name: &str) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| Self::is_call_to(request, method_name))
            .map(|request| String::from_utf8_lossy(&request.body).into_owned())
            .collect()
    }

    /// Verify that a specific endpoint was called
    pub async fn verify_endpoint_called(&self, method_name: &str, times: usize) {
        let calls = self.raw_requests_to(method_name).await.len();
        assert_eq!(
            calls, times,
            "expected {} to be called {} times, got {}",
            method_name, times, calls
        );
    }
}
