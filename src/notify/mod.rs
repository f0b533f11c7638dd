//! User-facing notification queue.
//!
//! Failures surfaced through error callbacks land here and stay until the
//! user dismisses them: insertion order, no deduplication, no capacity
//! bound, no expiry. The queue is a cheaply cloneable handle so producers
//! and the display layer can share it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Success,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
        }
    }
}

/// Identity of one notification; monotonic within a queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub u64);

/// A transient user-facing message
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

#[derive(Default)]
struct QueueInner {
    entries: Vec<Notification>,
    next_id: u64,
}

/// Shared, ordered queue of notifications
#[derive(Clone, Default)]
pub struct Notifications {
    inner: Arc<Mutex<QueueInner>>,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, QueueInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a message and returns its fresh id
    pub fn push(&self, severity: Severity, message: String) -> NotificationId {
        let mut inner = self.lock();
        let id = NotificationId(inner.next_id);
        inner.next_id += 1;
        inner.entries.push(Notification {
            id,
            message,
            severity,
        });
        id
    }

    /// Appends an error-severity message
    pub fn push_error(&self, message: String) -> NotificationId {
        self.push(Severity::Error, message)
    }

    /// Removes the notification with the given id; unknown ids are ignored
    pub fn dismiss(&self, id: NotificationId) {
        let mut inner = self.lock();
        let before = inner.entries.len();
        inner.entries.retain(|notification| notification.id != id);
        if inner.entries.len() == before {
            log::debug!("dismiss for unknown notification {:?}", id);
        }
    }

    /// Current entries in insertion order
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().entries.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }
}
