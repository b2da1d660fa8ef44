//! Webhook HTTP server
//!
//! Receives Telegram updates on `POST /webhook` and exposes a few
//! administrative routes for managing the webhook registration.

pub mod routes;

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Settings;
use crate::dispatcher::Dispatcher;
use crate::events::EventBus;
use crate::services::TelegramService;
use crate::utils::errors::{BotError, Result};

/// Shared state handed to every route
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub telegram: TelegramService,
    pub events: EventBus,
    pub webhook_secret: Option<String>,
    /// Full endpoint Telegram should deliver to, `/webhook` included
    pub webhook_url: Option<String>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, telegram: TelegramService, events: EventBus, settings: &Settings) -> Self {
        Self {
            dispatcher,
            telegram,
            events,
            webhook_secret: settings.bot.webhook_secret.clone(),
            webhook_url: settings.webhook_endpoint(),
            started_at: Instant::now(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/webhook",
            post(routes::receive_update).delete(routes::delete_webhook),
        )
        .route("/set-webhook", post(routes::set_webhook))
        .route("/webhook-info", get(routes::webhook_info))
        .fallback(routes::not_found)
        .with_state(state)
}

pub struct WebhookServer {
    addr: SocketAddr,
    state: AppState,
}

impl WebhookServer {
    pub fn new(host: &str, port: u16, state: AppState) -> Result<Self> {
        let addr = format!("{}:{}", host, port)
            .parse::<SocketAddr>()
            .map_err(|e| BotError::Config(format!("Invalid listen address {}:{}: {}", host, port, e)))?;
        Ok(Self { addr, state })
    }

    /// Serve until SIGINT or SIGTERM, then drain in-flight requests
    pub async fn run(self) -> Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        let webhook_url = self.state.webhook_url.clone();

        info!(addr = %self.addr, "Webhook server listening");
        match webhook_url {
            Some(url) => info!(webhook_url = %url, "Telegram deliveries expected here"),
            None => info!("No public webhook URL configured"),
        }

        axum::serve(listener, build_router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Webhook server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
