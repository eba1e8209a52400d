use std::path::PathBuf;
use std::time::Duration;

// ─── Defaults ───────────────────────────────────────────────────────────

/// Sample interval of the live monitor
pub const DEFAULT_TICK_RATE_MS: u64 = 300;
/// Upper bound on a single sampler call
pub const DEFAULT_SAMPLE_TIMEOUT_MS: u64 = 2000;
/// Samples kept per chart line
pub const DEFAULT_CAPACITY: usize = 300;
/// Common y range of all chart lines; 101 leaves a little headroom above 100%
pub const DEFAULT_DISPLAY_HEIGHT: f64 = 101.0;
/// Where the scan tool writes and the map tool reads
pub const DEFAULT_SNAPSHOT_PATH: &str = "scanresults.json";
/// How long the map stays on screen
pub const DEFAULT_OVERLAP_DISPLAY_SECS: u64 = 60;

/// Initial chart ceiling per metric, in raw driver units.
///
/// A sample above its ceiling raises it for the rest of the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ceilings {
    pub quality: f64,
    pub signal_level: f64,
    /// Bits per second
    pub bitrate: f64,
    pub noise: f64,
}

impl Default for Ceilings {
    fn default() -> Self {
        Self {
            quality: 70.0,
            signal_level: 256.0,
            bitrate: 54_000_000.0,
            noise: 256.0,
        }
    }
}

/// Runtime configuration shared by the three binaries.
///
/// Built from `Default` and overridden by CLI flags; there is no config file.
#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub sample_timeout: Duration,
    pub capacity: usize,
    pub display_height: f64,
    pub ceilings: Ceilings,
    pub snapshot_path: PathBuf,
    pub overlap_display: Duration,
    /// Log file path (logging disabled in the TUIs if not set)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
            sample_timeout: Duration::from_millis(DEFAULT_SAMPLE_TIMEOUT_MS),
            capacity: DEFAULT_CAPACITY,
            display_height: DEFAULT_DISPLAY_HEIGHT,
            ceilings: Ceilings::default(),
            snapshot_path: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
            overlap_display: Duration::from_secs(DEFAULT_OVERLAP_DISPLAY_SECS),
            log_file: None,
        }
    }
}

impl Config {
    /// Seconds between samples, for the chart's x axis label.
    pub fn tick_secs(&self) -> f64 {
        self.tick_rate.as_secs_f64()
    }
}
