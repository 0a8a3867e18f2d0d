use std::time::Duration;

pub(super) const fn default_hide_after() -> Duration {
    Duration::from_millis(3000)
}

pub(super) fn default_hide_policy() -> String {
    "replace".to_string()
}

pub(super) fn default_base_class() -> String {
    "message".to_string()
}

pub(super) fn default_success_class() -> String {
    "success".to_string()
}

pub(super) fn default_error_class() -> String {
    "error".to_string()
}

pub(super) fn default_primary_id() -> String {
    "message".to_string()
}

pub(super) fn default_fallback_id() -> String {
    "rental-message".to_string()
}

pub(super) const fn default_queue_bound() -> usize {
    64
}
