//! Callback registry
//!
//! Inline keyboard callbacks are matched against an ordered list of patterns;
//! the first pattern that matches the callback data wins.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use regex::Regex;
use teloxide::types::CallbackQuery;

use crate::utils::errors::Result;

pub type CallbackHandler =
    Arc<dyn Fn(CallbackQuery) -> BoxFuture<'static, Result<()>> + Send + Sync>;

/// What a callback registration matches against
#[derive(Clone, Debug)]
pub enum CallbackPattern {
    /// Matches only the identical string
    Exact(String),
    /// Matches when the regex finds a match anywhere in the data
    Regex(Regex),
}

impl CallbackPattern {
    /// Compile a regex pattern
    pub fn regex(pattern: &str) -> Result<Self> {
        Ok(CallbackPattern::Regex(Regex::new(pattern)?))
    }

    pub fn matches(&self, data: &str) -> bool {
        match self {
            CallbackPattern::Exact(expected) => expected == data,
            CallbackPattern::Regex(regex) => regex.is_match(data),
        }
    }

    /// The literal string or regex source this pattern was built from
    pub fn source(&self) -> &str {
        match self {
            CallbackPattern::Exact(expected) => expected,
            CallbackPattern::Regex(regex) => regex.as_str(),
        }
    }
}

impl From<&str> for CallbackPattern {
    fn from(value: &str) -> Self {
        CallbackPattern::Exact(value.to_string())
    }
}

impl From<String> for CallbackPattern {
    fn from(value: String) -> Self {
        CallbackPattern::Exact(value)
    }
}

impl From<Regex> for CallbackPattern {
    fn from(value: Regex) -> Self {
        CallbackPattern::Regex(value)
    }
}

#[derive(Clone)]
pub struct BotCallback {
    pub pattern: CallbackPattern,
    handler: CallbackHandler,
}

impl BotCallback {
    pub fn new<F, Fut>(pattern: impl Into<CallbackPattern>, handler: F) -> Self
    where
        F: Fn(CallbackQuery) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        Self {
            pattern: pattern.into(),
            handler: Arc::new(move |query| -> BoxFuture<'static, Result<()>> {
                Box::pin(handler(query))
            }),
        }
    }

    pub async fn invoke(&self, query: CallbackQuery) -> Result<()> {
        (self.handler)(query).await
    }
}

impl std::fmt::Debug for BotCallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotCallback")
            .field("pattern", &self.pattern.source())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Default, Debug)]
pub struct CallbackRegistry {
    callbacks: Vec<BotCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback; earlier registrations take precedence
    pub fn register(&mut self, callback: BotCallback) {
        self.callbacks.push(callback);
    }

    /// First registered callback whose pattern matches `data`
    pub fn find(&self, data: &str) -> Option<&BotCallback> {
        self.callbacks.iter().find(|cb| cb.pattern.matches(data))
    }

    /// Remove the first callback registered with the given pattern source
    pub fn remove(&mut self, source: &str) -> Option<BotCallback> {
        let index = self
            .callbacks
            .iter()
            .position(|cb| cb.pattern.source() == source)?;
        Some(self.callbacks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
