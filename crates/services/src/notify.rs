//! Notification sinks.

use tracing::{error, info};

use domains::ports::{Notice, NoticeLevel, Notifier};

/// Writes notices into the log stream. The server binary uses this; the
/// delivery mechanism is swappable behind the port.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Success => info!(message = %notice.message, "notice"),
            NoticeLevel::Error => error!(message = %notice.message, "notice"),
        }
    }
}
