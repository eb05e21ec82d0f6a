//! Transient user notifications

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A one-shot message for the shell to flash and discard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Stream of notices for shell consumption
pub type NoticeStream = UnboundedReceiverStream<Notice>;

/// Sender half used by the services layer
#[derive(Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn new() -> (Self, NoticeStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, UnboundedReceiverStream::new(rx))
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NoticeKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeKind::Error, message.into());
    }

    fn push(&self, kind: NoticeKind, message: String) {
        tracing::debug!(?kind, %message, "notice");
        // A shell that went away just stops listening; nothing to do.
        let _ = self.tx.send(Notice { kind, message });
    }
}
