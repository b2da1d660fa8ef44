//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod user;

// Re-export commonly used models
pub use user::{User, TelegramProfile, CreateUserRequest, UpdateUserRequest, UserStatistics};
