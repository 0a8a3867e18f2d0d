#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use notice::config::{HidePolicy, NotifySettings};
use notice::document::Document;
use notice::error::{Error, NotifyError};
use notice::notifier::Notifier;
use notice::target::{DisplayTarget, MemoryTarget, TargetResult, TargetState};
use notice::types::{ClassList, Visibility};
use tokio::time::sleep;

const DELAY: Duration = Duration::from_millis(3000);

fn settings(policy: HidePolicy) -> NotifySettings {
    NotifySettings {
        hide_policy: policy,
        ..NotifySettings::default()
    }
}

fn notifier(policy: HidePolicy) -> (Notifier<MemoryTarget>, MemoryTarget) {
    let target = MemoryTarget::new();
    let notifier = Notifier::new(target.clone(), settings(policy)).expect("notifier");
    (notifier, target)
}

fn state(target: &MemoryTarget) -> TargetState {
    target.snapshot().expect("snapshot")
}

/// Memory target whose `show` starts failing once `working_shows` succeeded.
struct BrokenAfter {
    inner: MemoryTarget,
    working_shows: usize,
    shows: Arc<AtomicUsize>,
}

impl DisplayTarget for BrokenAfter {
    fn set_text(&mut self, text: &str) -> TargetResult {
        self.inner.set_text(text)
    }

    fn set_classes(&mut self, classes: &ClassList) -> TargetResult {
        self.inner.set_classes(classes)
    }

    fn show(&mut self) -> TargetResult {
        if self.shows.fetch_add(1, Ordering::SeqCst) >= self.working_shows {
            return Err(NotifyError::from(std::io::Error::other("stdout closed")));
        }
        self.inner.show()
    }

    fn hide(&mut self) -> TargetResult {
        self.inner.hide()
    }
}

#[tokio::test(start_paused = true)]
async fn success_sets_text_and_success_variant() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("Vehicle rented", "success").unwrap();

    let state = state(&target);
    assert_eq!(state.text, "Vehicle rented");
    assert_eq!(state.class_name, "message success");
    assert!(state.has_class("success"));
    assert!(!state.has_class("error"));
}

#[tokio::test(start_paused = true)]
async fn any_other_category_is_error() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    for category in ["error", "", "SUCCESS", "info"] {
        notifier.display("nope", category).unwrap();
        let state = state(&target);
        assert!(state.has_class("error"), "category {category:?}");
        assert!(!state.has_class("success"), "category {category:?}");
    }

    notifier.display("absent", None::<&str>).unwrap();
    assert_eq!(state(&target).class_name, "message error");
}

#[tokio::test(start_paused = true)]
async fn empty_message_is_displayed_as_is() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("", "success").unwrap();
    let state = state(&target);
    assert_eq!(state.text, "");
    assert_eq!(state.visibility, Visibility::Shown);
}

#[tokio::test(start_paused = true)]
async fn shown_immediately_and_hidden_after_delay() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("Saved", "success").unwrap();

    assert_eq!(state(&target).visibility, Visibility::Shown);
    assert_eq!(notifier.visibility().unwrap(), Visibility::Shown);
    assert_eq!(notifier.pending_hides(), 1);

    sleep(DELAY - Duration::from_millis(1)).await;
    assert_eq!(state(&target).visibility, Visibility::Shown);

    sleep(Duration::from_millis(2)).await;
    let state = state(&target);
    assert_eq!(state.visibility, Visibility::Hidden);
    assert_eq!(state.text, "Saved");
    assert_eq!(notifier.visibility().unwrap(), Visibility::Hidden);
    assert_eq!(notifier.pending_hides(), 0);
}

#[tokio::test(start_paused = true)]
async fn repeated_display_replaces_classes() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("one", "success").unwrap();
    let first = state(&target).class_name;
    notifier.display("one", "success").unwrap();
    assert_eq!(state(&target).class_name, first);

    notifier.display("two", "error").unwrap();
    assert_eq!(state(&target).class_name, "message error");
}

#[tokio::test(start_paused = true)]
async fn overlap_keeps_every_hide_armed() {
    let (mut notifier, target) = notifier(HidePolicy::Overlap);
    notifier.display("A", "success").unwrap();
    notifier.display("B", "error").unwrap();

    assert_eq!(notifier.pending_hides(), 2);
    let shown = state(&target);
    assert_eq!(shown.text, "B");
    assert_eq!(shown.class_name, "message error");

    sleep(DELAY + Duration::from_millis(1)).await;
    let hidden = state(&target);
    assert_eq!(hidden.visibility, Visibility::Hidden);
    assert_eq!(hidden.text, "B");
    assert_eq!(hidden.class_name, "message error");
    assert_eq!(hidden.hides, 2);
    assert_eq!(notifier.pending_hides(), 0);
}

#[tokio::test(start_paused = true)]
async fn overlap_hides_on_the_earliest_deadline() {
    let (mut notifier, target) = notifier(HidePolicy::Overlap);
    notifier.display("A", "success").unwrap();
    sleep(Duration::from_millis(1000)).await;
    notifier.display("B", "error").unwrap();

    sleep(Duration::from_millis(2001)).await;
    assert_eq!(state(&target).visibility, Visibility::Hidden);
    assert_eq!(notifier.pending_hides(), 1);
}

#[tokio::test(start_paused = true)]
async fn replace_lets_the_latest_notice_govern() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("A", "success").unwrap();
    sleep(Duration::from_millis(1000)).await;
    notifier.display("B", "error").unwrap();
    assert_eq!(notifier.pending_hides(), 1);

    sleep(Duration::from_millis(2500)).await;
    let still = state(&target);
    assert_eq!(still.visibility, Visibility::Shown);
    assert_eq!(still.text, "B");

    sleep(Duration::from_millis(501)).await;
    let hidden = state(&target);
    assert_eq!(hidden.visibility, Visibility::Hidden);
    assert_eq!(hidden.hides, 1);
}

#[tokio::test(start_paused = true)]
async fn hide_now_cancels_pending_hides() {
    let (mut notifier, target) = notifier(HidePolicy::Overlap);
    notifier.display("A", "success").unwrap();
    notifier.display("B", "success").unwrap();
    notifier.hide_now().unwrap();

    assert_eq!(notifier.pending_hides(), 0);
    assert_eq!(state(&target).visibility, Visibility::Hidden);

    sleep(DELAY * 2).await;
    assert_eq!(state(&target).hides, 1);
}

#[tokio::test(start_paused = true)]
async fn settle_waits_for_the_last_hide() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("A", "success").unwrap();
    notifier.settle().await;
    assert_eq!(state(&target).visibility, Visibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_notifier_cancels_its_hide() {
    let (mut notifier, target) = notifier(HidePolicy::Replace);
    notifier.display("A", "success").unwrap();
    drop(notifier);

    sleep(DELAY * 2).await;
    assert_eq!(state(&target).visibility, Visibility::Shown);
}

#[tokio::test(start_paused = true)]
async fn resolves_fallback_identifier_from_document() {
    let fallback = MemoryTarget::new();
    let mut document = Document::new();
    document.insert("rental-message", fallback.clone());

    let mut notifier = Notifier::from_document(&document, NotifySettings::default()).unwrap();
    notifier.display("Rental confirmed", "success").unwrap();
    assert_eq!(state(&fallback).text, "Rental confirmed");
}

#[tokio::test(start_paused = true)]
async fn missing_target_fails_before_any_mutation() {
    let unrelated = MemoryTarget::new();
    let mut document = Document::new();
    document.insert("status", unrelated.clone());

    let result = Notifier::from_document(&document, NotifySettings::default());
    let err = result.err().expect("missing target must fail");
    assert!(err.is_target_not_found());
    assert!(matches!(
        err,
        Error::Notify(NotifyError::TargetNotFound { .. })
    ));
    assert_eq!(state(&unrelated), TargetState::default());
}

#[tokio::test(start_paused = true)]
async fn failed_display_does_not_leave_the_target_visible() {
    let target = MemoryTarget::new();
    let broken = BrokenAfter {
        inner: target.clone(),
        working_shows: 1,
        shows: Arc::new(AtomicUsize::new(0)),
    };
    let mut notifier = Notifier::new(broken, settings(HidePolicy::Replace)).unwrap();

    notifier.display("A", "success").unwrap();
    let err = notifier.display("B", "error").unwrap_err();
    assert!(matches!(err, Error::Notify(NotifyError::Render { .. })));

    assert_eq!(state(&target).visibility, Visibility::Hidden);
    assert_eq!(notifier.visibility().unwrap(), Visibility::Hidden);
    assert_eq!(notifier.pending_hides(), 0);

    sleep(DELAY * 10).await;
    assert_eq!(state(&target).visibility, Visibility::Hidden);
}

#[tokio::test(start_paused = true)]
async fn failing_first_show_leaves_target_hidden() {
    let target = MemoryTarget::new();
    let shows = Arc::new(AtomicUsize::new(0));
    let broken = BrokenAfter {
        inner: target.clone(),
        working_shows: 0,
        shows: Arc::clone(&shows),
    };
    let mut notifier = Notifier::new(broken, settings(HidePolicy::Replace)).unwrap();

    assert!(notifier.display("A", "success").is_err());
    assert_eq!(state(&target).visibility, Visibility::Hidden);
    assert_eq!(shows.load(Ordering::SeqCst), 1);
}
