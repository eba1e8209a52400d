use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::{format_bitrate, format_frequency};

/// Link statistics as reported by the driver, in raw driver units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LinkStats {
    pub quality: i32,
    /// Raw byte form of the signal level (dBm values wrap into 64..=255)
    pub signal_level: u8,
    pub noise_level: i32,
}

/// One point-in-time reading of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sample {
    pub quality: i32,
    pub signal_level: u8,
    pub noise_level: i32,
    /// Bits per second
    pub bitrate: u64,
}

impl Sample {
    pub fn new(stats: LinkStats, bitrate: u64) -> Self {
        Self {
            quality: stats.quality,
            signal_level: stats.signal_level,
            noise_level: stats.noise_level,
            bitrate,
        }
    }
}

/// What an associated interface reports about its network.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub essid: String,
    pub frequency_hz: f64,
    /// Wireless protocol name, e.g. "IEEE 802.11"
    pub technology: String,
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}",
            self.essid,
            format_frequency(self.frequency_hz),
            self.technology
        )
    }
}

/// A scanned access point. This is also the on-disk snapshot record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessPoint {
    pub essid: String,
    pub frequency_hz: f64,
    /// Raw byte form of the signal level, see [`LinkStats::signal_level`]
    pub signal_level: i32,
}

impl fmt::Display for AccessPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, level {})",
            self.essid,
            format_frequency(self.frequency_hz),
            self.signal_level
        )
    }
}

/// Supported channel centre frequencies, in channel order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelInfo {
    pub frequencies_hz: Vec<f64>,
}

impl ChannelInfo {
    pub fn new(frequencies_hz: Vec<f64>) -> Self {
        Self { frequencies_hz }
    }

    /// The common 2.4 GHz (1-14) and 5 GHz channel plan.
    pub fn standard() -> Self {
        let two_ghz = (1..=14).filter_map(frequency_from_channel);
        let five_ghz = FIVE_GHZ_CHANNELS
            .iter()
            .filter_map(|&ch| frequency_from_channel(ch));
        Self {
            frequencies_hz: two_ghz.chain(five_ghz).map(|mhz| mhz as f64 * 1e6).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies_hz.is_empty()
    }

    /// 1-based position of `frequency_hz` in the list, matched to the MHz.
    pub fn channel_index(&self, frequency_hz: f64) -> Option<usize> {
        let wanted = (frequency_hz / 1e6).round();
        self.frequencies_hz
            .iter()
            .position(|&f| (f / 1e6).round() == wanted)
            .map(|i| i + 1)
    }
}

const FIVE_GHZ_CHANNELS: &[u32] = &[
    36, 40, 44, 48, 52, 56, 60, 64, 100, 104, 108, 112, 116, 120, 124, 128, 132, 136, 140, 144,
    149, 153, 157, 161, 165,
];

/// Centre frequency in MHz of a 2.4 or 5 GHz channel number
pub fn frequency_from_channel(channel: u32) -> Option<u32> {
    match channel {
        14 => Some(2484),
        1..=13 => Some(2407 + 5 * channel),
        32..=177 => Some(5000 + 5 * channel),
        _ => None,
    }
}

/// Short display of a bitrate, shared by the summary line.
pub fn bitrate_label(bits: u64) -> String {
    if bits == 0 {
        "unknown".to_string()
    } else {
        format_bitrate(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_frequencies() {
        assert_eq!(frequency_from_channel(1), Some(2412));
        assert_eq!(frequency_from_channel(13), Some(2472));
        assert_eq!(frequency_from_channel(14), Some(2484));
        assert_eq!(frequency_from_channel(36), Some(5180));
        assert_eq!(frequency_from_channel(0), None);
    }

    #[test]
    fn standard_plan_starts_with_2ghz() {
        let info = ChannelInfo::standard();
        assert_eq!(info.len(), 14 + FIVE_GHZ_CHANNELS.len());
        assert_eq!(info.channel_index(2.412e9), Some(1));
        assert_eq!(info.channel_index(2.484e9), Some(14));
        assert_eq!(info.channel_index(5.18e9), Some(15));
        assert_eq!(info.channel_index(3.0e9), None);
    }

    #[test]
    fn channel_index_tolerates_rounding() {
        let info = ChannelInfo::new(vec![2.412e9, 2.417e9]);
        assert_eq!(info.channel_index(2_417_000_400.0), Some(2));
    }

    #[test]
    fn identity_display() {
        let id = Identity {
            essid: "home".into(),
            frequency_hz: 2.437e9,
            technology: "IEEE 802.11".into(),
        };
        assert_eq!(id.to_string(), "home, 2.437 GHz, IEEE 802.11");
    }

    #[test]
    fn access_point_display() {
        let ap = AccessPoint {
            essid: "cafe".into(),
            frequency_hz: 2.412e9,
            signal_level: 190,
        };
        assert_eq!(ap.to_string(), "cafe (2.412 GHz, level 190)");
    }
}
