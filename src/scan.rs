use tracing::{debug, info, warn};

use crate::error::{RssiError, RssiResult};
use crate::wireless::{AccessPoint, Sampler};

/// Scan `interface`, settling for cached results when scanning is not permitted.
///
/// A permission failure is logged and the last cached scan is used instead
/// (possibly empty). Any other failure is returned, not printed; a scan
/// failure gains the interface name.
pub fn capture<S: Sampler + ?Sized>(sampler: &S, interface: &str) -> RssiResult<Vec<AccessPoint>> {
    match sampler.scan(interface) {
        Ok(aps) => {
            info!("{}: scan found {} access points", interface, aps.len());
            for ap in &aps {
                debug!("{}: {}", interface, ap);
            }
            Ok(aps)
        }
        Err(RssiError::PermissionDenied(reason)) => {
            warn!(
                "{}: not permitted to scan ({}), using cached results",
                interface, reason
            );
            match sampler.cached_scan(interface) {
                Ok(aps) => Ok(aps),
                Err(e) => {
                    warn!("{}: no cached scan results: {}", interface, e);
                    Ok(Vec::new())
                }
            }
        }
        Err(RssiError::ScanFailed(reason)) => Err(RssiError::ScanFailed(format!(
            "{:<8.16}  Interface doesn't support scanning : {}",
            interface, reason
        ))),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wireless::{ChannelInfo, Identity, LinkStats};

    enum ScanBehaviour {
        Works,
        Denied { cache: bool },
        Broken,
    }

    struct ScanOnly(ScanBehaviour);

    fn ap(essid: &str) -> AccessPoint {
        AccessPoint {
            essid: essid.to_string(),
            frequency_hz: 2.412e9,
            signal_level: 200,
        }
    }

    impl Sampler for ScanOnly {
        fn list_interfaces(&self) -> RssiResult<Vec<String>> {
            Ok(vec!["wlan0".into()])
        }
        fn identity(&self, _: &str) -> RssiResult<Identity> {
            unreachable!()
        }
        fn stats(&self, _: &str) -> RssiResult<LinkStats> {
            unreachable!()
        }
        fn bitrate(&self, _: &str) -> RssiResult<u64> {
            unreachable!()
        }
        fn scan(&self, _: &str) -> RssiResult<Vec<AccessPoint>> {
            match self.0 {
                ScanBehaviour::Works => Ok(vec![ap("fresh")]),
                ScanBehaviour::Denied { .. } => {
                    Err(RssiError::PermissionDenied("Operation not permitted".into()))
                }
                ScanBehaviour::Broken => Err(RssiError::ScanFailed("no such device".into())),
            }
        }
        fn cached_scan(&self, _: &str) -> RssiResult<Vec<AccessPoint>> {
            match self.0 {
                ScanBehaviour::Denied { cache: true } => Ok(vec![ap("cached")]),
                _ => Err(RssiError::ScanFailed("nothing cached".into())),
            }
        }
        fn channel_info(&self, _: &str) -> RssiResult<ChannelInfo> {
            Ok(ChannelInfo::standard())
        }
    }

    #[test]
    fn fresh_scan() {
        let aps = capture(&ScanOnly(ScanBehaviour::Works), "wlan0").unwrap();
        assert_eq!(aps, vec![ap("fresh")]);
    }

    #[test]
    fn permission_failure_uses_cache() {
        let aps = capture(&ScanOnly(ScanBehaviour::Denied { cache: true }), "wlan0").unwrap();
        assert_eq!(aps, vec![ap("cached")]);
    }

    #[test]
    fn permission_failure_without_cache_is_empty() {
        let aps = capture(&ScanOnly(ScanBehaviour::Denied { cache: false }), "wlan0").unwrap();
        assert!(aps.is_empty());
    }

    #[test]
    fn other_failures_propagate_once_with_interface() {
        match capture(&ScanOnly(ScanBehaviour::Broken), "wlan0") {
            Err(RssiError::ScanFailed(reason)) => {
                assert!(reason.starts_with("wlan0"));
                assert!(reason.contains("Interface doesn't support scanning : no such device"));
                // the reason is not wrapped twice
                assert!(!reason.contains("Scan failed"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
