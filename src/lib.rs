//! wifirssi: plot wifi link quality, signal level, noise and bitrate in the
//! terminal, and visualize access point overlap per channel.

pub mod config;
pub mod error;
pub mod event;
pub mod graph;
pub mod logging;
pub mod overlap;
pub mod scan;
pub mod session;
pub mod snapshot;
pub mod tui;
pub mod ui;
pub mod units;
pub mod wireless;

pub use config::Config;
pub use error::{RssiError, RssiResult};
pub use graph::ScrollingBuffer;
pub use session::{DisplaySession, SessionEnd, SessionState};
