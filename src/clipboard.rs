use arboard::Clipboard;
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How long the copy confirmation stays on screen.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(2000);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard write failed: {0}")]
    Write(String),
}

pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard. The handle is opened lazily and kept afterwards, since
/// on some platforms dropping it also drops the clipboard contents.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        match self.inner.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| ClipboardError::Write(e.to_string())),
            None => Err(ClipboardError::Unavailable("not initialized".to_string())),
        }
    }
}

/// Keeps the last written text.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub fail: bool,
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.fail {
            return Err(ClipboardError::Write("denied".to_string()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The exact text the copy action puts on the clipboard.
pub fn payload_text(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyFeedback {
    #[default]
    None,
    Copied(Instant),
    Failed(Instant),
}

impl CopyFeedback {
    pub fn from_outcome(ok: bool, at: Instant) -> Self {
        if ok {
            CopyFeedback::Copied(at)
        } else {
            CopyFeedback::Failed(at)
        }
    }

    /// Clears the indicator once it has been shown for [`FEEDBACK_DURATION`].
    pub fn expire(&mut self, now: Instant) {
        let since = match self {
            CopyFeedback::Copied(at) | CopyFeedback::Failed(at) => *at,
            CopyFeedback::None => return,
        };
        if now.saturating_duration_since(since) >= FEEDBACK_DURATION {
            *self = CopyFeedback::None;
        }
    }
}
