//! # Notifications
//!
//! User-facing failure messages emitted by cart operations.
//!
//! ## Message Selection
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation   Error                          Notification                │
//! │  ─────────   ─────                          ────────────                │
//! │  add         OutOfStock / InvalidQuantity   OutOfStock                  │
//! │  add         anything else                  AddFailed                   │
//! │  remove      anything                       RemoveFailed                │
//! │  update      OutOfStock / InvalidQuantity   OutOfStock                  │
//! │  update      anything else                  UpdateFailed                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::Serialize;
use shoecart_core::CartError;
use tokio::sync::broadcast;
use tracing::warn;

use crate::ports::NotificationSink;

// =============================================================================
// Operation
// =============================================================================

/// The cart mutation a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Remove,
    Update,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Add => write!(f, "add_product"),
            Operation::Remove => write!(f, "remove_product"),
            Operation::Update => write!(f, "update_product_amount"),
        }
    }
}

// =============================================================================
// Notification
// =============================================================================

/// A human-readable failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    AddFailed,
    OutOfStock,
    RemoveFailed,
    UpdateFailed,
}

impl Notification {
    /// Picks the message for a failed operation.
    pub fn for_error(operation: Operation, error: &CartError) -> Self {
        match operation {
            Operation::Remove => Notification::RemoveFailed,
            _ if error.is_stock_error() => Notification::OutOfStock,
            Operation::Add => Notification::AddFailed,
            Operation::Update => Notification::UpdateFailed,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Notification::AddFailed => "product could not be added",
            Notification::OutOfStock => "requested quantity out of stock",
            Notification::RemoveFailed => "product could not be removed",
            Notification::UpdateFailed => "product quantity could not be changed",
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Writes each notification to the log at `warn` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, notification: Notification) {
        warn!(kind = ?notification, "{}", notification);
    }
}

/// Fans notifications out to any number of async receivers.
///
/// Slow receivers lag rather than block the store; a send with no receivers
/// is dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<Notification>,
}

impl ChannelNotifier {
    /// Buffers up to `capacity` messages per receiver; zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        ChannelNotifier { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        ChannelNotifier::new(64)
    }
}

impl NotificationSink for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        let _ = self.tx.send(notification);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
