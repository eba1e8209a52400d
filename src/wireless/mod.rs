pub mod iw;
pub mod linux;
pub mod proc;
pub mod types;
mod wext;

pub use linux::LinuxSampler;
pub use types::*;

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::{RssiError, RssiResult};

/// How long a finished program waits for sampler calls still in flight
pub const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

/// Source of wireless statistics for named interfaces.
///
/// Calls are blocking. Sessions run them on tokio's blocking pool with a
/// timeout, so an implementation may sit in a system call.
pub trait Sampler {
    /// Names of the wireless interfaces present on the system.
    fn list_interfaces(&self) -> RssiResult<Vec<String>>;

    /// ESSID, frequency and protocol name. Fails with
    /// [`RssiError::NotConnected`](crate::error::RssiError::NotConnected) when
    /// the interface is missing or not associated.
    fn identity(&self, interface: &str) -> RssiResult<Identity>;

    /// Current link statistics. Fails with
    /// [`RssiError::InterfaceLost`](crate::error::RssiError::InterfaceLost)
    /// once the interface is gone.
    fn stats(&self, interface: &str) -> RssiResult<LinkStats>;

    /// Current transmit bitrate in bits per second.
    fn bitrate(&self, interface: &str) -> RssiResult<u64>;

    /// Trigger a scan and return the access points seen.
    fn scan(&self, interface: &str) -> RssiResult<Vec<AccessPoint>>;

    /// Results of the last scan without triggering a new one.
    fn cached_scan(&self, _interface: &str) -> RssiResult<Vec<AccessPoint>> {
        Ok(Vec::new())
    }

    /// Channel centre frequencies supported by the interface.
    fn channel_info(&self, interface: &str) -> RssiResult<ChannelInfo>;

    /// Stats and bitrate combined into one [`Sample`].
    fn sample(&self, interface: &str) -> RssiResult<Sample> {
        let stats = self.stats(interface)?;
        let bitrate = self.bitrate(interface)?;
        Ok(Sample::new(stats, bitrate))
    }
}

/// Run a blocking sampler call on tokio's blocking pool, bounded by `limit`.
///
/// A call that does not return in time yields [`RssiError::Timeout`]; the
/// blocking thread is left to finish on its own.
pub async fn bounded<T, F>(limit: Duration, interface: &str, call: F) -> RssiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RssiResult<T> + Send + 'static,
{
    match tokio::time::timeout(limit, tokio::task::spawn_blocking(call)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(RssiError::Task(join.to_string())),
        Err(_) => Err(RssiError::Timeout {
            interface: interface.to_string(),
            after: limit,
        }),
    }
}

/// Drive `future` to completion on a fresh multi-threaded runtime.
///
/// A [`bounded`] call that timed out keeps its blocking thread until the
/// system call returns. Dropping a runtime waits for those threads, so the
/// runtime is shut down with [`SHUTDOWN_GRACE`] instead and stragglers are
/// abandoned.
pub fn run_detached<F: Future>(future: F) -> RssiResult<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("wifirssi")
        .enable_all()
        .build()?;
    let output = runtime.block_on(future);
    debug!("Shutting down runtime");
    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    Ok(output)
}
