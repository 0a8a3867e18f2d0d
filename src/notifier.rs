//! Transient notices with automatic hiding.
//!
//! [`Notifier::display`] mutates its target synchronously (text, classes,
//! visibility) and arms a one-shot hide on the tokio runtime it was created in.
//! Under [`HidePolicy::Replace`] a newer display cancels the older hide, and a
//! generation counter keeps a hide that already woke up from touching the newer
//! notice. Under [`HidePolicy::Overlap`] every hide stays armed and fires.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, trace, warn};

use crate::Result;
use crate::config::{HidePolicy, NotifySettings};
use crate::document::Document;
use crate::error::NotifyError;
use crate::target::{DisplayTarget, TargetResult};
use crate::types::{Category, ClassList, Notification, Visibility};

struct Slot<T> {
    target: T,
    visibility: Visibility,
    generation: u64,
}

pub struct Notifier<T: DisplayTarget> {
    slot: Arc<Mutex<Slot<T>>>,
    settings: NotifySettings,
    runtime: Handle,
    pending: Vec<JoinHandle<()>>,
}

impl<T: DisplayTarget> Notifier<T> {
    /// Take ownership of an already resolved target.
    ///
    /// # Errors
    ///
    /// [`NotifyError::NoRuntime`] when called outside a tokio runtime.
    pub fn new(target: T, settings: NotifySettings) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;
        Ok(Self {
            slot: Arc::new(Mutex::new(Slot {
                target,
                visibility: Visibility::Hidden,
                generation: 0,
            })),
            settings,
            runtime,
            pending: Vec::new(),
        })
    }

    /// Resolve the target by the configured identifiers, primary first.
    ///
    /// # Errors
    ///
    /// [`NotifyError::TargetNotFound`] if neither identifier is registered; no
    /// target is touched in that case.
    pub fn from_document(document: &Document<T>, settings: NotifySettings) -> Result<Self>
    where
        T: Clone,
    {
        let target = document.resolve(&settings.primary_id, &settings.fallback_id)?;
        Self::new(target, settings)
    }

    #[must_use]
    pub const fn settings(&self) -> &NotifySettings {
        &self.settings
    }

    /// Show `message` styled by `category` and arm its hide.
    ///
    /// # Errors
    ///
    /// Propagates failures of the target. On failure the target is hidden
    /// again and no hide is armed, so a half-applied notice never stays up.
    pub fn display(&mut self, message: &str, category: impl Into<Category>) -> Result<()> {
        let category = category.into();
        let classes = self.settings.classes_for(category);
        let deadline = Instant::now() + self.settings.hide_after;

        self.prune_finished();
        if self.settings.hide_policy == HidePolicy::Replace {
            self.cancel_pending();
        }

        let generation = {
            let mut slot = lock(&self.slot)?;
            slot.generation += 1;
            if let Err(err) = apply(&mut slot.target, message, &classes) {
                if let Err(hide_err) = slot.target.hide() {
                    warn!(error = %hide_err, "failed to hide notice after a failed display");
                }
                slot.visibility = Visibility::Hidden;
                return Err(err.into());
            }
            slot.visibility = Visibility::Shown;
            slot.generation
        };

        debug!(
            %category,
            generation,
            hide_after = ?self.settings.hide_after,
            policy = %self.settings.hide_policy,
            "notice displayed"
        );

        let hide = self.spawn_hide(deadline, generation);
        self.pending.push(hide);
        Ok(())
    }

    /// [`display`](Self::display) for an owned notification.
    ///
    /// # Errors
    ///
    /// Same as [`display`](Self::display).
    pub fn display_notification(&mut self, notification: &Notification) -> Result<()> {
        self.display(&notification.text, notification.category)
    }

    /// Hide right away and drop every pending hide.
    ///
    /// # Errors
    ///
    /// Propagates failures of the target.
    pub fn hide_now(&mut self) -> Result<()> {
        self.cancel_pending();
        let mut slot = lock(&self.slot)?;
        slot.generation += 1;
        slot.target.hide()?;
        slot.visibility = Visibility::Hidden;
        Ok(())
    }

    /// Hides armed and not fired yet.
    #[must_use]
    pub fn pending_hides(&self) -> usize {
        self.pending.iter().filter(|hide| !hide.is_finished()).count()
    }

    /// # Errors
    ///
    /// [`NotifyError::Poisoned`] if a hide panicked while holding the target.
    pub fn visibility(&self) -> Result<Visibility> {
        Ok(lock(&self.slot)?.visibility)
    }

    /// Wait until every armed hide has fired.
    pub async fn settle(&mut self) {
        for hide in self.pending.drain(..) {
            if let Err(err) = hide.await {
                if !err.is_cancelled() {
                    warn!(error = %err, "hide task failed");
                }
            }
        }
    }

    fn spawn_hide(&self, deadline: Instant, generation: u64) -> JoinHandle<()> {
        let slot = Arc::clone(&self.slot);
        let policy = self.settings.hide_policy;
        self.runtime.spawn(async move {
            sleep_until(deadline).await;
            let Ok(mut slot) = slot.lock() else {
                warn!(generation, "display target lock poisoned, skipping hide");
                return;
            };
            if policy == HidePolicy::Replace && slot.generation != generation {
                trace!(generation, current = slot.generation, "superseded hide ignored");
                return;
            }
            match slot.target.hide() {
                Ok(()) => debug!(generation, "notice hidden"),
                Err(err) => warn!(error = %err, generation, "failed to hide notice"),
            }
            slot.visibility = Visibility::Hidden;
        })
    }

    fn cancel_pending(&mut self) {
        for hide in self.pending.drain(..) {
            hide.abort();
        }
    }

    fn prune_finished(&mut self) {
        self.pending.retain(|hide| !hide.is_finished());
    }
}

impl<T: DisplayTarget> Drop for Notifier<T> {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn apply<T: DisplayTarget>(target: &mut T, message: &str, classes: &ClassList) -> TargetResult {
    target.set_text(message)?;
    target.set_classes(classes)?;
    target.show()
}

fn lock<T>(slot: &Mutex<Slot<T>>) -> std::result::Result<MutexGuard<'_, Slot<T>>, NotifyError> {
    slot.lock().map_err(|_| NotifyError::Poisoned)
}
