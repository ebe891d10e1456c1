//! Asset readiness registry.
//!
//! The core never loads bytes itself. Hosts register the keys they intend to
//! load and flip them as the platform delivers; renderers ask before drawing
//! and fall back to placeholder shapes for anything not ready.

use std::collections::HashMap;

/// Lifecycle of one registered asset key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetState {
    Pending,
    Ready,
    /// Load failed; renderers keep the placeholder
    Failed,
}

#[derive(Debug, Default)]
pub struct AssetCatalog {
    entries: HashMap<String, AssetState>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key as pending. Re-registering resets it.
    pub fn register(&mut self, key: &str) {
        self.entries.insert(key.to_string(), AssetState::Pending);
    }

    pub fn mark_ready(&mut self, key: &str) {
        if !self.entries.contains_key(key) {
            log::warn!("marking unregistered asset {:?} ready", key);
        }
        self.entries.insert(key.to_string(), AssetState::Ready);
    }

    pub fn mark_failed(&mut self, key: &str) {
        log::warn!("asset {:?} failed to load", key);
        self.entries.insert(key.to_string(), AssetState::Failed);
    }

    pub fn state(&self, key: &str) -> AssetState {
        self.entries
            .get(key)
            .copied()
            .unwrap_or(AssetState::Pending)
    }

    /// Safe to draw this key with real art?
    pub fn is_ready(&self, key: &str) -> bool {
        self.state(key) == AssetState::Ready
    }

    /// No loads still in flight (every key is Ready or Failed).
    pub fn all_settled(&self) -> bool {
        self.entries.values().all(|s| *s != AssetState::Pending)
    }

    /// Every registered key loaded successfully.
    pub fn all_ready(&self) -> bool {
        self.entries.values().all(|s| *s == AssetState::Ready)
    }
}
