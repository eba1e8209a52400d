use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{RssiError, RssiResult};
use crate::wireless::proc::{parse_interfaces, parse_link_stats, PROC_NET_WIRELESS};
use crate::wireless::types::*;
use crate::wireless::wext::{WextFrequency, WextSocket};
use crate::wireless::{iw, Sampler};

const SYS_CLASS_NET: &str = "/sys/class/net";

/// Sampler backed by wireless extensions, `/proc/net/wireless` and `iw`.
pub struct LinuxSampler {
    sys_class_net: PathBuf,
    proc_wireless: PathBuf,
}

impl LinuxSampler {
    pub fn new() -> Self {
        Self {
            sys_class_net: PathBuf::from(SYS_CLASS_NET),
            proc_wireless: PathBuf::from(PROC_NET_WIRELESS),
        }
    }

    /// Read sysfs and procfs from other roots.
    pub fn with_paths(sys_class_net: impl Into<PathBuf>, proc_wireless: impl Into<PathBuf>) -> Self {
        Self {
            sys_class_net: sys_class_net.into(),
            proc_wireless: proc_wireless.into(),
        }
    }

    fn phy_name(&self, interface: &str) -> io::Result<String> {
        let path = self
            .sys_class_net
            .join(interface)
            .join("phy80211")
            .join("name");
        Ok(fs::read_to_string(path)?.trim().to_string())
    }
}

impl Default for LinuxSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl Sampler for LinuxSampler {
    fn list_interfaces(&self) -> RssiResult<Vec<String>> {
        let mut interfaces = Vec::new();
        for entry in fs::read_dir(&self.sys_class_net)? {
            let entry = entry?;
            if !is_wireless(&entry.path()) {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                interfaces.push(name);
            }
        }
        // Drivers without a sysfs wireless dir still show up in the proc table
        if let Ok(table) = fs::read_to_string(&self.proc_wireless) {
            for name in parse_interfaces(&table) {
                if !interfaces.contains(&name) {
                    interfaces.push(name);
                }
            }
        }
        interfaces.sort();
        Ok(interfaces)
    }

    fn identity(&self, interface: &str) -> RssiResult<Identity> {
        let not_connected = |e: io::Error| RssiError::NotConnected {
            interface: interface.to_string(),
            reason: e.to_string(),
        };

        let socket = WextSocket::open()?;
        let essid = socket.essid(interface).map_err(not_connected)?;
        let frequency = socket.frequency(interface).map_err(not_connected)?;
        let technology = socket.name(interface).map_err(not_connected)?;

        if essid.is_empty() {
            return Err(RssiError::NotConnected {
                interface: interface.to_string(),
                reason: "no ESSID".to_string(),
            });
        }

        let frequency_hz = match frequency {
            WextFrequency::Hz(hz) => hz,
            WextFrequency::Channel(ch) => frequency_from_channel(ch)
                .map(|mhz| f64::from(mhz) * 1e6)
                .unwrap_or(0.0),
        };

        debug!("{}: {} {} {}", interface, essid, frequency_hz, technology);
        Ok(Identity {
            essid,
            frequency_hz,
            technology,
        })
    }

    fn stats(&self, interface: &str) -> RssiResult<LinkStats> {
        let table = fs::read_to_string(&self.proc_wireless).map_err(|e| {
            RssiError::InterfaceLost {
                interface: interface.to_string(),
                reason: e.to_string(),
            }
        })?;
        parse_link_stats(&table, interface)?.ok_or_else(|| RssiError::InterfaceLost {
            interface: interface.to_string(),
            reason: format!("not listed in {}", self.proc_wireless.display()),
        })
    }

    fn bitrate(&self, interface: &str) -> RssiResult<u64> {
        let lost = |e: io::Error| RssiError::InterfaceLost {
            interface: interface.to_string(),
            reason: e.to_string(),
        };
        let socket = WextSocket::open()?;
        socket.bitrate(interface).map_err(lost)
    }

    fn scan(&self, interface: &str) -> RssiResult<Vec<AccessPoint>> {
        iw::scan(interface, false)
    }

    fn cached_scan(&self, interface: &str) -> RssiResult<Vec<AccessPoint>> {
        iw::scan(interface, true)
    }

    fn channel_info(&self, interface: &str) -> RssiResult<ChannelInfo> {
        if !is_wireless(&self.sys_class_net.join(interface)) {
            return Err(RssiError::NotConnected {
                interface: interface.to_string(),
                reason: "not a wireless interface".to_string(),
            });
        }

        let channels = self
            .phy_name(interface)
            .map_err(RssiError::from)
            .and_then(|phy| iw::phy_channels(&phy));
        match channels {
            Ok(info) => Ok(info),
            Err(e) => {
                warn!(
                    "Could not read channel list of {}: {}, using the standard plan",
                    interface, e
                );
                Ok(ChannelInfo::standard())
            }
        }
    }
}

fn is_wireless(iface_dir: &Path) -> bool {
    iface_dir.join("wireless").is_dir() || iface_dir.join("phy80211").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fake_root() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let net = root.path().join("net");
        fs::create_dir_all(net.join("wlan0").join("wireless")).unwrap();
        fs::create_dir_all(net.join("eth0")).unwrap();
        fs::create_dir_all(net.join("wlp3s0").join("wireless")).unwrap();
        fs::write(
            root.path().join("wireless"),
            "h1\nh2\n wlan0: 0000   55.  -60.  -256  0 0 0 0 0 0\n",
        )
        .unwrap();
        root
    }

    fn sampler(root: &tempfile::TempDir) -> LinuxSampler {
        LinuxSampler::with_paths(root.path().join("net"), root.path().join("wireless"))
    }

    #[test]
    fn lists_only_wireless_interfaces() {
        let root = fake_root();
        assert_eq!(
            sampler(&root).list_interfaces().unwrap(),
            vec!["wlan0".to_string(), "wlp3s0".to_string()]
        );
    }

    #[test]
    fn reads_stats_from_proc_table() {
        let root = fake_root();
        let stats = sampler(&root).stats("wlan0").unwrap();
        assert_eq!(stats.quality, 55);
        assert_eq!(stats.signal_level, 196);
    }

    #[test]
    fn unlisted_interface_is_lost() {
        let root = fake_root();
        assert!(matches!(
            sampler(&root).stats("wlp3s0"),
            Err(RssiError::InterfaceLost { .. })
        ));
    }

    #[test]
    fn channel_info_rejects_wired_interface() {
        let root = fake_root();
        assert!(matches!(
            sampler(&root).channel_info("eth0"),
            Err(RssiError::NotConnected { .. })
        ));
    }

    #[test]
    fn channel_info_falls_back_to_standard_plan() {
        let root = fake_root();
        // no phy80211/name, so iw is never consulted
        let info = sampler(&root).channel_info("wlan0").unwrap();
        assert_eq!(info, ChannelInfo::standard());
    }
}
