use notify_rust::{Notification, NotificationHandle, Timeout, Urgency};
use tracing::trace;

use crate::error::NotifyError;
use crate::types::{Category, ClassList};

use super::{DisplayTarget, TargetResult};

/// Desktop notification bubble kept open until the notifier hides it.
///
/// The notification server's own timeout is disabled; visibility is driven only
/// by `show`/`hide` so the notifier's delay stays authoritative.
pub struct DesktopTarget {
    appname: String,
    text: String,
    category: Category,
    handle: Option<NotificationHandle>,
}

impl DesktopTarget {
    pub fn new(appname: impl Into<String>) -> Self {
        Self {
            appname: appname.into(),
            text: String::new(),
            category: Category::Error,
            handle: None,
        }
    }
}

impl DisplayTarget for DesktopTarget {
    fn set_text(&mut self, text: &str) -> TargetResult {
        text.clone_into(&mut self.text);
        Ok(())
    }

    fn set_classes(&mut self, classes: &ClassList) -> TargetResult {
        self.category = classes.category;
        Ok(())
    }

    fn show(&mut self) -> TargetResult {
        let summary = summary(self.category);
        let urgency = urgency(self.category);

        if let Some(handle) = self.handle.as_mut() {
            trace!(id = handle.id(), "updating desktop notification in place");
            handle.summary(summary).body(&self.text).urgency(urgency);
            handle.update();
            return Ok(());
        }

        let handle = Notification::new()
            .appname(&self.appname)
            .summary(summary)
            .body(&self.text)
            .urgency(urgency)
            .timeout(Timeout::Never)
            .show()
            .map_err(|err| NotifyError::Backend(err.to_string()))?;
        self.handle = Some(handle);
        Ok(())
    }

    fn hide(&mut self) -> TargetResult {
        if let Some(handle) = self.handle.take() {
            handle.close();
        }
        Ok(())
    }
}

const fn summary(category: Category) -> &'static str {
    match category {
        Category::Success => "Success",
        Category::Error => "Error",
    }
}

const fn urgency(category: Category) -> Urgency {
    match category {
        Category::Success => Urgency::Low,
        Category::Error => Urgency::Normal,
    }
}
