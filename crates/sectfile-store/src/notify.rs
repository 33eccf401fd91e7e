//! Advisory failure notifications.
//!
//! Compatibility-mode writes never return errors. When one is abandoned the
//! store hands a [`Notice`] to its [`Notifier`] instead; what the host does
//! with it (a dialog, a status line, a log entry) is up to the host.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::error;

/// The write operation that was abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Replacing a section body.
    SetSection,
    /// Appending a new section header.
    AppendSection,
}

/// Why the operation was abandoned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// The existing content could not be read before editing.
    PrepareFailed,
    /// Writing the new content failed.
    SaveFailed,
    /// The section name or body could not be stored as given.
    Rejected,
}

/// A single advisory notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub operation: Operation,
    pub kind: NoticeKind,
    /// Section the operation targeted.
    pub section: String,
    /// Location of the resource.
    pub locator: String,
    /// Text of the underlying error.
    pub detail: String,
}

impl Notice {
    /// Short user-facing message.
    pub fn message(&self) -> &'static str {
        match (self.operation, self.kind) {
            (Operation::SetSection, NoticeKind::PrepareFailed) => "Difficulty preparing to save data",
            (Operation::SetSection, NoticeKind::SaveFailed) => "Attempt to save data failed.",
            (Operation::AppendSection, NoticeKind::PrepareFailed) => {
                "Difficulty preparing to add section"
            }
            (Operation::AppendSection, NoticeKind::SaveFailed) => "Difficulty saving section",
            (_, NoticeKind::Rejected) => "Section data cannot be stored",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}: {})", self.message(), self.locator, self.detail)
    }
}

/// Receiver for advisory notices.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice)
    }
}

/// Default notifier: reports through `tracing` at error level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        error!(
            operation = ?notice.operation,
            kind = ?notice.kind,
            section = %notice.section,
            locator = %notice.locator,
            detail = %notice.detail,
            "{}",
            notice.message()
        );
    }
}

/// Collects notices for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notice received so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.lock().map(|n| n.is_empty()).unwrap_or(true)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(operation: Operation, kind: NoticeKind) -> Notice {
        Notice {
            operation,
            kind,
            section: "Gold".into(),
            locator: "memory".into(),
            detail: "disk full".into(),
        }
    }

    #[test]
    fn messages_follow_the_operation() {
        assert_eq!(
            notice(Operation::SetSection, NoticeKind::SaveFailed).message(),
            "Attempt to save data failed."
        );
        assert_eq!(
            notice(Operation::AppendSection, NoticeKind::PrepareFailed).message(),
            "Difficulty preparing to add section"
        );
        assert_eq!(
            notice(Operation::AppendSection, NoticeKind::SaveFailed).message(),
            "Difficulty saving section"
        );
    }

    #[test]
    fn display_includes_locator_and_detail() {
        let text = notice(Operation::SetSection, NoticeKind::SaveFailed).to_string();
        assert_eq!(text, "Attempt to save data failed. (memory: disk full)");
    }

    #[test]
    fn recorder_keeps_order() {
        let rec = Arc::new(RecordingNotifier::new());
        assert!(rec.is_empty());
        rec.notify(&notice(Operation::SetSection, NoticeKind::PrepareFailed));
        rec.notify(&notice(Operation::AppendSection, NoticeKind::SaveFailed));
        let got = rec.notices();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0].kind, NoticeKind::PrepareFailed);
        assert_eq!(got[1].operation, Operation::AppendSection);
    }
}
