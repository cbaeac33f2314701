//! Single-slot transient notification.
//!
//! At most one message is visible. Showing a new message replaces the current
//! one and restarts its timer; nothing is queued. Times are
//! [`tokio::time::Instant`] so paused-clock tests can drive expiry.

use std::time::Duration;

use tokio::time::Instant;

/// Default time a message stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    pub kind: ToastKind,
    pub text: String,
    pub shown_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Toast {
    current: Option<ToastMessage>,
    duration: Duration,
}

impl Toast {
    pub fn new(duration: Duration) -> Self {
        Self {
            current: None,
            duration,
        }
    }

    pub fn show(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) {
        self.current = Some(ToastMessage {
            kind,
            text: text.into(),
            shown_at: now,
        });
    }

    pub fn success(&mut self, text: impl Into<String>, now: Instant) {
        self.show(ToastKind::Success, text, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.show(ToastKind::Error, text, now);
    }

    /// The visible message at `now`, if it has not expired.
    pub fn visible(&self, now: Instant) -> Option<&ToastMessage> {
        self.current
            .as_ref()
            .filter(|m| now.saturating_duration_since(m.shown_at) < self.duration)
    }

    /// Drop the message once its time is up.
    pub fn expire(&mut self, now: Instant) {
        if self.visible(now).is_none() {
            self.current = None;
        }
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Last message issued, expired or not.
    pub fn last(&self) -> Option<&ToastMessage> {
        self.current.as_ref()
    }
}

impl Default for Toast {
    fn default() -> Self {
        Self::new(TOAST_DURATION)
    }
}
