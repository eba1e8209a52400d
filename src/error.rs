use std::time::Duration;

use thiserror::Error;

/// Unified error type for wifirssi
#[derive(Error, Debug)]
pub enum RssiError {
    #[error("Interface {interface} is not connected: {reason}")]
    NotConnected { interface: String, reason: String },

    #[error("Configured interface {interface} lost: {reason}")]
    InterfaceLost { interface: String, reason: String },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Scan failed: {0}")]
    ScanFailed(String),

    #[error("Timeout: {interface} did not answer within {after:?}")]
    Timeout { interface: String, after: Duration },

    #[error("No usable wireless interface ({})", .0.join("; "))]
    NoUsableInterface(Vec<String>),

    #[error("Session for {0} already ran and cannot be restarted")]
    SessionClosed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Sampler task failed: {0}")]
    Task(String),
}

pub type RssiResult<T> = Result<T, RssiError>;
