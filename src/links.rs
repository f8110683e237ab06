//! The "last captured link" slot
//!
//! Whatever observes the user's link interactions writes here; the
//! orchestrator reads it when triggered and clears it once an upload that
//! used it succeeds. Last write wins.

use std::sync::{Arc, Mutex};
use tracing::debug;

use crate::classify::is_likely_log_url;

/// Single-slot storage for a link URL
pub trait LinkStore: Send + Sync {
    fn set(&self, url: String);
    fn get(&self) -> Option<String>;
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    slot: Mutex<Option<String>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LinkStore for InMemoryLinkStore {
    fn set(&self, url: String) {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = Some(url);
    }

    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn clear(&self) {
        *self.slot.lock().unwrap_or_else(|p| p.into_inner()) = None;
    }
}

/// Link observer: remembers a link only when it looks like a log.
#[derive(Clone)]
pub struct LinkCapture {
    store: Arc<dyn LinkStore>,
}

impl LinkCapture {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    /// Returns whether the link was remembered
    pub fn observe(&self, href: &str) -> bool {
        if !is_likely_log_url(href) {
            debug!(href, "Ignoring link that does not look like a log");
            return false;
        }
        self.store.set(href.to_string());
        debug!(href, "Captured log link");
        true
    }
}
