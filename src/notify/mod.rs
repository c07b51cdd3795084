//! Toast-style outbound notifications and the observer/navigation ports the
//! console core reports through.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use colored::Colorize;

/// Message categories delivered to a [`NotificationSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Optional extra detail shown under the headline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyOptions {
    pub description: Option<String>,
}

impl NotifyOptions {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
        }
    }
}

/// Receiver of short success/failure messages after operator actions.
pub trait NotificationSink {
    fn success(&self, message: &str, options: Option<NotifyOptions>);

    fn error(&self, message: &str, options: Option<NotifyOptions>);
}

/// Prints colored notices to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier {
    pub plain: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn render(&self, kind: NoticeKind, message: &str, options: Option<&NotifyOptions>) -> String {
        let (label, icon) = match kind {
            NoticeKind::Success => ("SUCCESS", "[✓]"),
            NoticeKind::Error => ("ERROR", "[x]"),
        };
        let mut text = format!("{label}: {icon} {message}");
        if let Some(description) = options.and_then(|opts| opts.description.as_deref()) {
            text.push_str(&format!("\n    {description}"));
        }
        if self.plain {
            return text;
        }
        match kind {
            NoticeKind::Success => text.bright_green().to_string(),
            NoticeKind::Error => text.bright_red().to_string(),
        }
    }
}

impl NotificationSink for ConsoleNotifier {
    fn success(&self, message: &str, options: Option<NotifyOptions>) {
        println!("{}", self.render(NoticeKind::Success, message, options.as_ref()));
    }

    fn error(&self, message: &str, options: Option<NotifyOptions>) {
        println!("{}", self.render(NoticeKind::Error, message, options.as_ref()));
    }
}

/// Routes notices into the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn success(&self, message: &str, options: Option<NotifyOptions>) {
        let description = options.and_then(|opts| opts.description).unwrap_or_default();
        tracing::info!(%description, "{message}");
    }

    fn error(&self, message: &str, options: Option<NotifyOptions>) {
        let description = options.and_then(|opts| opts.description).unwrap_or_default();
        tracing::warn!(%description, "{message}");
    }
}

/// One delivered notice, as captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub description: Option<String>,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.description {
            Some(description) => write!(f, "{:?}: {} ({})", self.kind, self.message, description),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

/// Keeps every notice in memory; cloned handles share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.borrow().clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.borrow().last().cloned()
    }

    fn push(&self, kind: NoticeKind, message: &str, options: Option<NotifyOptions>) {
        self.notices.borrow_mut().push(Notice {
            kind,
            message: message.to_string(),
            description: options.and_then(|opts| opts.description),
        });
    }
}

impl NotificationSink for RecordingNotifier {
    fn success(&self, message: &str, options: Option<NotifyOptions>) {
        self.push(NoticeKind::Success, message, options);
    }

    fn error(&self, message: &str, options: Option<NotifyOptions>) {
        self.push(NoticeKind::Error, message, options);
    }
}

/// Parent-driven navigation after a form finishes or is abandoned.
pub trait Navigation<T> {
    fn on_save(&self, record: &T);

    fn on_back(&self);
}

/// Navigation that goes nowhere; for callers without a parent view.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNavigation;

impl<T> Navigation<T> for NoNavigation {
    fn on_save(&self, _record: &T) {}

    fn on_back(&self) {}
}

/// Counts navigation callbacks.
#[derive(Debug, Default)]
pub struct RecordingNavigation {
    saved: Cell<usize>,
    backs: Cell<usize>,
}

impl RecordingNavigation {
    pub fn saved(&self) -> usize {
        self.saved.get()
    }

    pub fn backs(&self) -> usize {
        self.backs.get()
    }
}

impl<T> Navigation<T> for RecordingNavigation {
    fn on_save(&self, _record: &T) {
        self.saved.set(self.saved.get() + 1);
    }

    fn on_back(&self) {
        self.backs.set(self.backs.get() + 1);
    }
}
