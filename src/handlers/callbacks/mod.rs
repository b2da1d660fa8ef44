//! Callback query handlers

pub mod settings;

use crate::router::{BotCallback, BotRouter, CallbackPattern};
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Register every callback handler on the router, in match order
pub fn register(router: &mut BotRouter, services: &ServiceFactory) -> Result<()> {
    let s = services.clone();
    router.register_callback(BotCallback::new(
        CallbackPattern::regex("^settings_")?,
        move |query| settings::handle_settings_callback(query, s.clone()),
    ));
    Ok(())
}
