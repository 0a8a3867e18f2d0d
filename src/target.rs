//! Display targets: the regions a notice is written into and toggled.
//!
//! A target is resolved once by whoever builds the [`Notifier`](crate::notifier::Notifier)
//! and then owned by it; nothing here looks anything up by name.

use crate::error::NotifyError;
use crate::types::ClassList;

#[cfg(target_os = "linux")]
mod desktop;
mod memory;
mod status_line;

#[cfg(target_os = "linux")]
pub use desktop::DesktopTarget;
pub use memory::{MemoryTarget, TargetState};
pub use status_line::StatusLine;

pub type TargetResult = std::result::Result<(), NotifyError>;

/// Operations a notifier needs from the element it drives.
///
/// Calls arrive in the order text, classes, show for every display, and
/// `hide` may be called on an already hidden target.
pub trait DisplayTarget: Send + 'static {
    /// Replace the text content verbatim; never interpreted as markup.
    fn set_text(&mut self, text: &str) -> TargetResult;

    /// Replace the whole classification.
    fn set_classes(&mut self, classes: &ClassList) -> TargetResult;

    fn show(&mut self) -> TargetResult;

    fn hide(&mut self) -> TargetResult;
}

impl<T: DisplayTarget + ?Sized> DisplayTarget for Box<T> {
    fn set_text(&mut self, text: &str) -> TargetResult {
        (**self).set_text(text)
    }

    fn set_classes(&mut self, classes: &ClassList) -> TargetResult {
        (**self).set_classes(classes)
    }

    fn show(&mut self) -> TargetResult {
        (**self).show()
    }

    fn hide(&mut self) -> TargetResult {
        (**self).hide()
    }
}
