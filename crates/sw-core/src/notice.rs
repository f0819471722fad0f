//! User-facing notices and confirmation prompts.

use std::collections::VecDeque;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// An operation completed.
    Success,
    /// Partially completed or worth attention.
    Warning,
    /// The operation was rejected.
    Error,
}

impl Severity {
    /// Level the notice is mirrored to the log at. Problems surface under
    /// `RUST_LOG=warn`.
    pub fn log_level(self) -> log::Level {
        match self {
            Self::Error | Self::Warning => log::Level::Warn,
            Self::Info | Self::Success => log::Level::Debug,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A short message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation hint.
    pub severity: Severity,
    /// Message text.
    pub message: String,
}

impl Notice {
    /// Create a notice.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Fire-and-forget queue of notices. Frontends drain it after each
/// operation; nothing waits for acknowledgment.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a notice.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let notice = Notice::new(severity, message);
        log::log!(
            notice.severity.log_level(),
            "{}: {}",
            notice.severity,
            notice.message
        );
        self.queue.push_back(notice);
    }

    /// Take every queued notice, oldest first.
    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }

    /// Most recent notice, if any.
    pub fn last(&self) -> Option<&Notice> {
        self.queue.back()
    }

    /// Number of queued notices.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Synchronous yes/no gate in front of destructive actions. Answering no
/// aborts the action with no partial effect.
pub trait Confirm {
    /// Ask `question`; `true` means proceed.
    fn confirm(&mut self, question: &str) -> bool;
}

/// Answers yes to everything (`--yes`, or a frontend that already asked).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        true
    }
}

/// Answers no to everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _question: &str) -> bool {
        false
    }
}

/// `noun` pluralized for `count` the simple English way, without the number.
pub(crate) fn plural_noun(count: usize, noun: &str) -> String {
    if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    }
}

/// `count` followed by `noun`, pluralized.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    format!("{count} {}", plural_noun(count, noun))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_in_order_and_empties() {
        let mut n = Notices::new();
        n.push(Severity::Info, "one");
        n.push(Severity::Error, "two");
        assert_eq!(n.last().unwrap().message, "two");
        let drained = n.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].severity, Severity::Info);
        assert!(n.is_empty());
    }

    #[test]
    fn problems_log_as_warnings() {
        assert_eq!(Severity::Error.log_level(), log::Level::Warn);
        assert_eq!(Severity::Warning.log_level(), log::Level::Warn);
        assert_eq!(Severity::Success.log_level(), log::Level::Debug);
        assert_eq!(Severity::Info.log_level(), log::Level::Debug);
    }

    #[test]
    fn canned_confirmers() {
        assert!(AlwaysConfirm.confirm("sure?"));
        assert!(!NeverConfirm.confirm("sure?"));
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "option"), "1 option");
        assert_eq!(plural(3, "option"), "3 options");
        assert_eq!(plural(0, "duplicate"), "0 duplicates");
        assert_eq!(plural_noun(1, "option"), "option");
        assert_eq!(plural_noun(2, "option"), "options");
    }
}
