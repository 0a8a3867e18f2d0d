use std::collections::HashMap;

use crate::error::NotifyError;

/// Targets addressable by element identifier, the way a host page exposes them.
///
/// Only the composition root should look targets up here; the notifier itself
/// receives an already resolved handle.
#[derive(Debug)]
pub struct Document<T> {
    elements: HashMap<String, T>,
}

impl<T> Default for Document<T> {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
        }
    }
}

impl<T: Clone> Document<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `target` under `id`, returning whatever was there before.
    pub fn insert(&mut self, id: impl Into<String>, target: T) -> Option<T> {
        self.elements.insert(id.into(), target)
    }

    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.elements.remove(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    /// Handle registered under `primary`, else under `fallback`.
    ///
    /// # Errors
    ///
    /// [`NotifyError::TargetNotFound`] when neither identifier is registered.
    pub fn resolve(&self, primary: &str, fallback: &str) -> std::result::Result<T, NotifyError> {
        self.elements
            .get(primary)
            .or_else(|| self.elements.get(fallback))
            .cloned()
            .ok_or_else(|| NotifyError::TargetNotFound {
                primary: primary.to_string(),
                fallback: fallback.to_string(),
            })
    }
}
