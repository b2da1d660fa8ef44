//! Test context setup
//!
//! Wires the real router, dispatcher and HTTP app against the mock Bot API
//! and an in-memory user store.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt;

use safir_bot::config::Settings;
use safir_bot::events::EventBus;
use safir_bot::handlers;
use safir_bot::router::BotRouter;
use safir_bot::server::{build_router, AppState};
use safir_bot::services::{ServiceFactory, TelegramService};
use safir_bot::Dispatcher;

use super::memory_store::MemoryUserStore;
use super::telegram_mock::{TelegramMockServer, TEST_BOT_TOKEN};

pub struct TestContext {
    pub mock: TelegramMockServer,
    pub store: Arc<MemoryUserStore>,
    pub events: EventBus,
    pub services: ServiceFactory,
    pub app: Router,
}

pub fn test_settings(api_url: &str, secret: Option<&str>) -> Settings {
    let mut settings = Settings::default();
    settings.bot.token = TEST_BOT_TOKEN.to_string();
    settings.bot.api_url = Some(api_url.to_string());
    settings.bot.webhook_secret = secret.map(str::to_string);
    settings.bot.webhook_url = Some("https://bot.example.com".to_string());
    settings
}

impl TestContext {
    /// Context with the built-in handlers registered
    pub async fn new(secret: Option<&str>) -> Self {
        Self::with_router(secret, |router, services| {
            handlers::register_all(router, services).expect("built-in handlers register");
        })
        .await
    }

    /// Context whose router is filled by `customize`
    pub async fn with_router<F>(secret: Option<&str>, customize: F) -> Self
    where
        F: FnOnce(&mut BotRouter, &ServiceFactory),
    {
        let mock = TelegramMockServer::new().await;
        mock.setup_default_mocks().await;

        let settings = test_settings(&mock.api_url(), secret);
        let telegram = TelegramService::from_config(&settings.bot).expect("valid bot config");
        let store = Arc::new(MemoryUserStore::new());
        let events = EventBus::default();
        let services = ServiceFactory::new(telegram.clone(), store.clone(), events.clone());

        let mut router = BotRouter::new();
        customize(&mut router, &services);

        let dispatcher = Dispatcher::new(Arc::new(router), events.clone())
            .with_user_tracking(services.user_service.clone());
        let app = build_router(AppState::new(dispatcher, telegram, events.clone(), &settings));

        Self {
            mock,
            store,
            events,
            services,
            app,
        }
    }

    /// POST an update to `/webhook`
    pub async fn post_update(&self, payload: Value, secret: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::post("/webhook").header("content-type", "application/json");
        if let Some(secret) = secret {
            builder = builder.header("x-telegram-bot-api-secret-token", secret);
        }
        let request = builder.body(Body::from(payload.to_string())).unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }
}
