//! Channel overlap plot of a scan snapshot.
//!
//! Every access point becomes a small tent over the channel axis: full signal
//! level on its own channel and a little less on each neighbour, which is
//! roughly how much a 20 MHz transmission bleeds into adjacent channels.

use tracing::warn;

use crate::wireless::{AccessPoint, ChannelInfo};

/// Channels on the x axis (2.4 GHz plus a little room)
pub const CHART_WIDTH: usize = 16;
/// Signal levels are raw bytes
pub const CHART_HEIGHT: f64 = 256.0;
/// Level drop on the neighbouring channels
pub const BLEED: i32 = 10;

/// One access point's line over channels `1..=width`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApTrace {
    pub essid: String,
    pub channel: usize,
    pub signal_level: i32,
    /// `(channel, level)` for every channel on the axis
    pub points: Vec<(f64, f64)>,
}

/// An access point that could not be placed on the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Skipped {
    pub essid: String,
    pub frequency_hz: f64,
    /// Channel index, if the frequency was found at all
    pub channel: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlapPlot {
    pub width: usize,
    pub traces: Vec<ApTrace>,
    pub skipped: Vec<Skipped>,
}

impl OverlapPlot {
    /// Place every access point on a `width`-channel axis.
    ///
    /// Access points whose channel is unknown or beyond `width` are skipped
    /// with a warning.
    pub fn build(access_points: &[AccessPoint], channels: &ChannelInfo, width: usize) -> Self {
        let mut plot = OverlapPlot {
            width,
            ..Default::default()
        };

        for ap in access_points {
            match channels.channel_index(ap.frequency_hz) {
                Some(channel) if channel <= width => {
                    plot.traces.push(trace(ap, channel, width));
                }
                channel => {
                    match channel {
                        Some(ch) => warn!("Channel: {} not in 2.4Ghz, skipping {}", ch, ap),
                        None => warn!("{} is not on a known channel", ap),
                    }
                    plot.skipped.push(Skipped {
                        essid: ap.essid.clone(),
                        frequency_hz: ap.frequency_hz,
                        channel,
                    });
                }
            }
        }

        plot
    }

    /// Highest level on the chart, at least [`CHART_HEIGHT`].
    pub fn y_max(&self) -> f64 {
        self.traces
            .iter()
            .map(|t| f64::from(t.signal_level))
            .fold(CHART_HEIGHT, f64::max)
    }
}

fn trace(ap: &AccessPoint, channel: usize, width: usize) -> ApTrace {
    let mut levels = vec![0i32; width];
    let centre = channel - 1;
    levels[centre] = ap.signal_level;
    if centre > 0 {
        levels[centre - 1] = ap.signal_level - BLEED;
    }
    if centre + 1 < width {
        levels[centre + 1] = ap.signal_level - BLEED;
    }

    ApTrace {
        essid: ap.essid.clone(),
        channel,
        signal_level: ap.signal_level,
        points: levels
            .iter()
            .enumerate()
            .map(|(i, &level)| ((i + 1) as f64, f64::from(level)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ap(essid: &str, mhz: f64, level: i32) -> AccessPoint {
        AccessPoint {
            essid: essid.to_string(),
            frequency_hz: mhz * 1e6,
            signal_level: level,
        }
    }

    fn sixteen_channels() -> ChannelInfo {
        ChannelInfo::new((0..20).map(|i| (2412.0 + 5.0 * i as f64) * 1e6).collect())
    }

    #[test]
    fn tent_around_channel() {
        let plot = OverlapPlot::build(&[ap("home", 2437.0, 200)], &sixteen_channels(), 16);
        assert_eq!(plot.traces.len(), 1);
        let trace = &plot.traces[0];
        assert_eq!(trace.channel, 6);
        assert_eq!(trace.points.len(), 16);
        assert_eq!(trace.points[4], (5.0, 190.0));
        assert_eq!(trace.points[5], (6.0, 200.0));
        assert_eq!(trace.points[6], (7.0, 190.0));
        let nonzero = trace.points.iter().filter(|p| p.1 != 0.0).count();
        assert_eq!(nonzero, 3);
    }

    #[test]
    fn edge_channels_are_clipped_not_skipped() {
        let channels = sixteen_channels();
        let plot = OverlapPlot::build(
            &[ap("first", 2412.0, 100), ap("last", 2487.0, 150)],
            &channels,
            16,
        );
        assert!(plot.skipped.is_empty());
        assert_eq!(plot.traces[0].channel, 1);
        assert_eq!(plot.traces[0].points[0], (1.0, 100.0));
        assert_eq!(plot.traces[0].points[1], (2.0, 90.0));
        assert_eq!(plot.traces[1].channel, 16);
        assert_eq!(plot.traces[1].points[15], (16.0, 150.0));
        assert_eq!(plot.traces[1].points[14], (15.0, 140.0));
    }

    #[test]
    fn beyond_width_is_skipped_with_warning() {
        let plot = OverlapPlot::build(
            &[
                ap("near", 2412.0, 100),
                ap("far", 2492.0, 120),
                ap("farther", 2507.0, 120),
            ],
            &sixteen_channels(),
            16,
        );
        assert_eq!(plot.traces.len(), 1);
        assert_eq!(plot.skipped.len(), 2);
        assert_eq!(plot.skipped[0].channel, Some(17));
        assert_eq!(plot.skipped[1].channel, Some(20));
    }

    #[test]
    fn unknown_frequency_is_skipped() {
        let plot = OverlapPlot::build(&[ap("odd", 3000.0, 100)], &sixteen_channels(), 16);
        assert!(plot.traces.is_empty());
        assert_eq!(plot.skipped[0].channel, None);
    }

    #[test]
    fn y_max_grows_with_levels() {
        let plot = OverlapPlot::build(&[ap("home", 2412.0, 300)], &sixteen_channels(), 16);
        assert_eq!(plot.y_max(), 300.0);
        assert_eq!(OverlapPlot::default().y_max(), CHART_HEIGHT);
    }
}
