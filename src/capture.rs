//! Screen-capture failure categorisation.
//!
//! The capture itself is performed by the host (browser or compositor); this
//! module turns the error name it reports into a category with a user-facing
//! message and announces it. Failures are not retried.

use crate::notification::Announcer;
use log::warn;
use thiserror::Error;

/// Categorised screen-capture failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// The user or policy refused the capture permission (`NotAllowedError`)
    #[error("screen capture permission denied")]
    PermissionDenied,

    /// The host cannot capture screens at all (`NotSupportedError`)
    #[error("screen capture not supported")]
    NotSupported,

    /// No capturable screen or window was found (`NotFoundError`)
    #[error("no screen available to capture")]
    NotFound,

    /// The picker was dismissed (`AbortError`)
    #[error("screen capture cancelled")]
    Cancelled,

    /// Anything else the host reported
    #[error("screen capture failed: {0}")]
    Other(String),
}

impl CaptureError {
    /// Maps a host error name (`NotAllowedError`, ...) to a category.
    pub fn from_dom_name(name: &str, detail: &str) -> Self {
        match name {
            "NotAllowedError" | "PermissionDeniedError" => Self::PermissionDenied,
            "NotSupportedError" => Self::NotSupported,
            "NotFoundError" => Self::NotFound,
            "AbortError" => Self::Cancelled,
            _ if detail.is_empty() => Self::Other(name.to_string()),
            _ => Self::Other(format!("{name}: {detail}")),
        }
    }

    /// Message suitable for showing to the person sharing their screen.
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Screen sharing permission was denied. Allow screen sharing to annotate.".into()
            }
            Self::NotSupported => "Screen sharing is not supported on this device.".into(),
            Self::NotFound => "No screen or window is available to share.".into(),
            Self::Cancelled => "Screen sharing was cancelled.".into(),
            Self::Other(detail) => format!("Screen sharing failed: {detail}"),
        }
    }
}

/// Logs a capture failure and announces its user-facing message.
pub fn report_capture_failure(error: &CaptureError, announcer: &dyn Announcer) {
    warn!("Screen capture failed: {}", error);
    announcer.announce(&error.user_message());
}
