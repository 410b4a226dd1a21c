//! # Notifications
//!
//! Fire-and-forget delivery of [`Notice`]s to the shopper. Nothing is
//! returned and nothing is acknowledged.

use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;

use crate::error::Notice;

/// Shows notices to the shopper.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Writes notices to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        warn!(notice = ?notice, "{}", notice);
    }
}

/// Collects notices until someone drains them.
///
/// Clones share the same buffer, so a front end can hand one clone to the
/// store and keep another to render what was raised.
#[derive(Debug, Clone, Default)]
pub struct BufferedNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl BufferedNotifier {
    pub fn new() -> Self {
        BufferedNotifier::default()
    }

    /// Removes and returns every notice raised so far, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        let mut notices = self.notices.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *notices)
    }

    /// Copies the pending notices without removing them.
    pub fn pending(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for BufferedNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
