//! Notification sink
//!
//! Load and read failures surface as short, non-blocking notifications. The
//! registry hands them to a [`Notifier`]; the binary prints them, tests record them.

use std::cell::RefCell;
use std::rc::Rc;

use colored::Colorize;
use tracing::{info, warn};

use crate::error::RegistryError;

/// How a notification should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationStyle {
    Success,
    Warning,
    Failure,
}

/// A single user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub style: NotificationStyle,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn failure(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            style: NotificationStyle::Failure,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl From<&RegistryError> for Notification {
    fn from(err: &RegistryError) -> Self {
        Self {
            style: if err.is_warning() {
                NotificationStyle::Warning
            } else {
                NotificationStyle::Failure
            },
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

/// Receives notifications
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match notification.style {
            NotificationStyle::Success => {
                info!(title = %notification.title, message = %notification.message, "notify");
                eprintln!("{} {} {}", "✓".green(), notification.title, notification.message.cyan());
            }
            NotificationStyle::Warning => {
                warn!(title = %notification.title, message = %notification.message, "notify");
                eprintln!("{} {}: {}", "!".yellow(), notification.title.yellow(), notification.message);
            }
            NotificationStyle::Failure => {
                warn!(title = %notification.title, message = %notification.message, "notify");
                eprintln!("{} {}: {}", "✗".red(), notification.title.red(), notification.message);
            }
        }
    }
}

/// Records notifications in memory
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to the registry.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    seen: Rc<RefCell<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Number of recorded notifications with the given title
    pub fn count_titled(&self, title: &str) -> usize {
        self.seen.borrow().iter().filter(|n| n.title == title).count()
    }

    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}
