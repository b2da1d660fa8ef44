//! Test helpers module
//!
//! Shared utilities for the integration tests: a mock Telegram Bot API,
//! an in-memory user store, update fixtures, and a fully wired test app.

#![allow(dead_code)]

pub mod memory_store;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;

pub use memory_store::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
