//! Scanning and channel lists through the `iw` command line tool.

use std::process::Command;

use tracing::debug;

use crate::error::{RssiError, RssiResult};
use crate::wireless::types::{AccessPoint, ChannelInfo};

/// Run `iw dev <iface> scan`, or `scan dump` for cached results.
pub fn scan(interface: &str, cached: bool) -> RssiResult<Vec<AccessPoint>> {
    let mut args = vec!["dev", interface, "scan"];
    if cached {
        args.push("dump");
    }
    let stdout = run_iw(&args)?;
    Ok(parse_scan_output(&stdout))
}

/// Run `iw phy <phy> info` and collect its frequency list.
pub fn phy_channels(phy: &str) -> RssiResult<ChannelInfo> {
    let stdout = run_iw(&["phy", phy, "info"])?;
    let info = parse_phy_frequencies(&stdout);
    if info.is_empty() {
        return Err(RssiError::Parse(format!("no frequencies listed for {}", phy)));
    }
    Ok(info)
}

fn run_iw(args: &[&str]) -> RssiResult<String> {
    debug!("running iw {}", args.join(" "));
    let output = Command::new("iw").args(args).output().map_err(|e| {
        RssiError::ScanFailed(format!("failed to run `iw {}`: {}", args.join(" "), e))
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = format!("iw exited with {}: {}", output.status, stderr.trim());
        // iw reports EPERM as "command failed: Operation not permitted (-1)"
        if stderr.contains("Operation not permitted") {
            return Err(RssiError::PermissionDenied(reason));
        }
        return Err(RssiError::ScanFailed(reason));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Intermediate accumulator for fields within a single BSS stanza.
#[derive(Default)]
struct BssStanza {
    ssid: Option<String>,
    freq_mhz: Option<f64>,
    signal_dbm: Option<f64>,
}

impl BssStanza {
    fn flush(self) -> Option<AccessPoint> {
        let freq_mhz = self.freq_mhz?;
        let signal_dbm = self.signal_dbm?;
        Some(AccessPoint {
            essid: self.ssid.unwrap_or_default(),
            frequency_hz: freq_mhz * 1e6,
            signal_level: (signal_dbm.round() as i32).rem_euclid(256),
        })
    }
}

/// Parse `iw dev <iface> scan` output into access points, in output order.
/// Stanzas without a frequency or signal are dropped.
pub fn parse_scan_output(output: &str) -> Vec<AccessPoint> {
    let mut results = Vec::new();
    let mut current: Option<BssStanza> = None;

    for line in output.lines() {
        if line.starts_with("BSS ") {
            if let Some(ap) = current.take().and_then(BssStanza::flush) {
                results.push(ap);
            }
            current = Some(BssStanza::default());
            continue;
        }

        let Some(stanza) = current.as_mut() else {
            continue;
        };
        let trimmed = line.trim();

        if let Some(value) = trimmed.strip_prefix("freq:") {
            stanza.freq_mhz = value.trim().parse().ok();
        } else if let Some(value) = trimmed.strip_prefix("signal:") {
            stanza.signal_dbm = value
                .split_whitespace()
                .next()
                .and_then(|v| v.parse().ok());
        } else if let Some(value) = trimmed.strip_prefix("SSID:") {
            if stanza.ssid.is_none() {
                stanza.ssid = Some(value.trim().to_string());
            }
        }
    }

    if let Some(ap) = current.and_then(BssStanza::flush) {
        results.push(ap);
    }
    results
}

/// Parse the `* 2412 MHz [1] (20.0 dBm)` lines of `iw phy <phy> info`.
pub fn parse_phy_frequencies(output: &str) -> ChannelInfo {
    let frequencies = output
        .lines()
        .filter_map(|line| line.trim().strip_prefix("* "))
        .filter(|rest| rest.contains(" MHz ["))
        .filter_map(|rest| rest.split_whitespace().next())
        .filter_map(|mhz| mhz.parse::<f64>().ok())
        .map(|mhz| mhz * 1e6)
        .collect();
    ChannelInfo::new(frequencies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCAN: &str = "\
BSS 00:11:22:33:44:55(on wlan0) -- associated
\tTSF: 123456 usec (0d, 00:00:00)
\tfreq: 2412
\tbeacon interval: 100 TUs
\tsignal: -45.00 dBm
\tlast seen: 0 ms ago
\tSSID: home
BSS aa:bb:cc:dd:ee:ff(on wlan0)
\tfreq: 5180.0
\tsignal: -71.50 dBm
\tSSID: office
\tRSN:\t * Version: 1
BSS 11:11:11:11:11:11(on wlan0)
\tSSID: broken
";

    #[test]
    fn parses_scan_stanzas() {
        let aps = parse_scan_output(SCAN);
        assert_eq!(aps.len(), 2);
        assert_eq!(aps[0].essid, "home");
        assert_eq!(aps[0].frequency_hz, 2412e6);
        assert_eq!(aps[0].signal_level, 211);
        assert_eq!(aps[1].essid, "office");
        assert_eq!(aps[1].frequency_hz, 5180e6);
        assert_eq!(aps[1].signal_level, 184);
    }

    #[test]
    fn empty_output_has_no_results() {
        assert!(parse_scan_output("").is_empty());
    }

    #[test]
    fn parses_phy_frequency_list() {
        let info = parse_phy_frequencies(
            "\
Wiphy phy0
\tBand 1:
\t\tFrequencies:
\t\t\t* 2412 MHz [1] (20.0 dBm)
\t\t\t* 2417.0 MHz [2] (20.0 dBm)
\t\t\t* 2484 MHz [14] (disabled)
\t\tBitrates (non-HT):
\t\t\t* 1.0 Mbps
\tBand 2:
\t\tFrequencies:
\t\t\t* 5180 MHz [36] (23.0 dBm)
",
        );
        assert_eq!(info.frequencies_hz, vec![2412e6, 2417e6, 2484e6, 5180e6]);
        assert_eq!(info.channel_index(5180e6), Some(4));
    }
}
