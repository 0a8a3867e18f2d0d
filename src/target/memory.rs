use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::NotifyError;
use crate::types::{ClassList, Visibility};

use super::{DisplayTarget, TargetResult};

/// Observable state of a [`MemoryTarget`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TargetState {
    pub text: String,
    /// Class attribute as a page would hold it, e.g. `"message success"`.
    pub class_name: String,
    pub visibility: Visibility,
    pub shows: usize,
    pub hides: usize,
}

impl TargetState {
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }
}

/// In-memory element shared between clones, like a handle to a page node.
#[derive(Clone, Debug, Default)]
pub struct MemoryTarget {
    state: Arc<Mutex<TargetState>>,
}

impl MemoryTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Poisoned`] if a writer panicked mid-update.
    pub fn snapshot(&self) -> std::result::Result<TargetState, NotifyError> {
        self.lock().map(|state| state.clone())
    }

    fn lock(&self) -> std::result::Result<MutexGuard<'_, TargetState>, NotifyError> {
        self.state.lock().map_err(|_| NotifyError::Poisoned)
    }
}

impl DisplayTarget for MemoryTarget {
    fn set_text(&mut self, text: &str) -> TargetResult {
        text.clone_into(&mut self.lock()?.text);
        Ok(())
    }

    fn set_classes(&mut self, classes: &ClassList) -> TargetResult {
        self.lock()?.class_name = classes.to_string();
        Ok(())
    }

    fn show(&mut self) -> TargetResult {
        let mut state = self.lock()?;
        state.visibility = Visibility::Shown;
        state.shows += 1;
        Ok(())
    }

    fn hide(&mut self) -> TargetResult {
        let mut state = self.lock()?;
        state.visibility = Visibility::Hidden;
        state.hides += 1;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::MemoryTarget;
    use crate::target::DisplayTarget;
    use crate::types::{Category, ClassList, Visibility};

    #[test]
    fn clones_share_state() {
        let observer = MemoryTarget::new();
        let mut writer = observer.clone();
        writer.set_text("<b>saved</b>").unwrap();
        writer
            .set_classes(&ClassList {
                base: "message".to_string(),
                variant: "success".to_string(),
                category: Category::Success,
            })
            .unwrap();
        writer.show().unwrap();

        let state = observer.snapshot().unwrap();
        assert_eq!(state.text, "<b>saved</b>");
        assert_eq!(state.class_name, "message success");
        assert!(state.has_class("success"));
        assert_eq!(state.visibility, Visibility::Shown);
    }

    #[test]
    fn hiding_twice_is_harmless() {
        let mut target = MemoryTarget::new();
        target.hide().unwrap();
        target.hide().unwrap();
        let state = target.snapshot().unwrap();
        assert_eq!(state.visibility, Visibility::Hidden);
        assert_eq!(state.hides, 2);
    }
}
