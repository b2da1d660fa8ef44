//! Services module
//!
//! This module contains business logic services

pub mod telegram;
pub mod templates;
pub mod user;

// Re-export commonly used services
pub use telegram::TelegramService;
pub use user::UserService;

use std::sync::Arc;

use crate::database::UserStore;
use crate::events::EventBus;

/// Service factory for creating and sharing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub user_service: UserService,
    pub telegram_service: TelegramService,
    pub events: EventBus,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(telegram_service: TelegramService, user_store: Arc<dyn UserStore>, events: EventBus) -> Self {
        let user_service = UserService::new(user_store, events.clone());

        Self {
            user_service,
            telegram_service,
            events,
        }
    }
}
