//! The live monitor: one interface, four scrolling chart lines.

use std::sync::Arc;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{RssiError, RssiResult};
use crate::event::{Event, EventHandler};
use crate::graph::ScrollingBuffer;
use crate::ui;
use crate::units::{dbm_to_units, u8_to_dbm};
use crate::wireless::{bitrate_label, bounded, Identity, Sample, Sampler};

/// A tracked chart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Quality,
    SignalLevel,
    Bitrate,
    Noise,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Quality,
        Metric::SignalLevel,
        Metric::Bitrate,
        Metric::Noise,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Quality => "Quality",
            Self::SignalLevel => "Sig Lev",
            Self::Bitrate => "Bitrate",
            Self::Noise => "Noise",
        }
    }

    /// The sample field this line plots, in raw units.
    pub fn value(&self, sample: &Sample) -> f64 {
        match self {
            Self::Quality => f64::from(sample.quality),
            Self::SignalLevel => f64::from(sample.signal_level),
            Self::Bitrate => sample.bitrate as f64,
            Self::Noise => f64::from(sample.noise_level),
        }
    }
}

/// One scrolling buffer per [`Metric`].
#[derive(Debug, Clone)]
pub struct Metrics {
    pub quality: ScrollingBuffer,
    pub signal_level: ScrollingBuffer,
    pub bitrate: ScrollingBuffer,
    pub noise: ScrollingBuffer,
}

impl Metrics {
    pub fn new(config: &Config) -> Self {
        let buffer = |max| ScrollingBuffer::new(config.capacity, config.display_height, max);
        Self {
            quality: buffer(config.ceilings.quality),
            signal_level: buffer(config.ceilings.signal_level),
            bitrate: buffer(config.ceilings.bitrate),
            noise: buffer(config.ceilings.noise),
        }
    }

    pub fn get(&self, metric: Metric) -> &ScrollingBuffer {
        match metric {
            Metric::Quality => &self.quality,
            Metric::SignalLevel => &self.signal_level,
            Metric::Bitrate => &self.bitrate,
            Metric::Noise => &self.noise,
        }
    }

    fn get_mut(&mut self, metric: Metric) -> &mut ScrollingBuffer {
        match metric {
            Metric::Quality => &mut self.quality,
            Metric::SignalLevel => &mut self.signal_level,
            Metric::Bitrate => &mut self.bitrate,
            Metric::Noise => &mut self.noise,
        }
    }

    pub fn feed(&mut self, sample: &Sample) {
        for metric in Metric::ALL {
            let raised = self.get_mut(metric).update(metric.value(sample));
            if raised {
                debug!("{} ceiling raised to {}", metric.label(), metric.value(sample));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, &ScrollingBuffer)> {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Running,
}

/// Why [`DisplaySession::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The window was closed
    Closed,
    /// The sampler stopped answering for the interface
    InterfaceLost,
    /// A sampler call exceeded the sample timeout
    TimedOut,
}

/// Polls one interface and keeps its chart history.
pub struct DisplaySession<S> {
    sampler: Arc<S>,
    interface: String,
    identity: Identity,
    metrics: Metrics,
    last: Option<Sample>,
    state: SessionState,
    started: bool,
    sample_timeout: Duration,
    tick_secs: f64,
}

impl<S> DisplaySession<S>
where
    S: Sampler + Send + Sync + 'static,
{
    /// Read the interface identity and set up the chart buffers.
    ///
    /// Fails with [`RssiError::NotConnected`] if the identity cannot be read;
    /// nothing is kept in that case.
    pub async fn open(sampler: Arc<S>, interface: &str, config: &Config) -> RssiResult<Self> {
        let identity = {
            let sampler = Arc::clone(&sampler);
            let iface = interface.to_string();
            bounded(config.sample_timeout, interface, move || {
                sampler.identity(&iface)
            })
            .await
        };

        let identity = match identity {
            Ok(identity) => identity,
            Err(e @ RssiError::NotConnected { .. }) => return Err(e),
            Err(e) => {
                return Err(RssiError::NotConnected {
                    interface: interface.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        info!("Monitoring {}: {}", interface, identity);

        Ok(Self {
            sampler,
            interface: interface.to_string(),
            identity,
            metrics: Metrics::new(config),
            last: None,
            state: SessionState::Stopped,
            started: false,
            sample_timeout: config.sample_timeout,
            tick_secs: config.tick_secs(),
        })
    }

    /// Move to `Running`. A session runs at most once.
    pub fn start(&mut self) -> RssiResult<()> {
        if self.started {
            return Err(RssiError::SessionClosed(self.interface.clone()));
        }
        self.started = true;
        self.state = SessionState::Running;
        Ok(())
    }

    /// Take one sample and feed it to the chart buffers.
    pub async fn poll(&mut self) -> RssiResult<Sample> {
        let sampler = Arc::clone(&self.sampler);
        let iface = self.interface.clone();
        let sample = bounded(self.sample_timeout, &self.interface, move || {
            sampler.sample(&iface)
        })
        .await?;

        self.metrics.feed(&sample);
        self.last = Some(sample);
        Ok(sample)
    }

    pub fn stop(&mut self) {
        if self.state == SessionState::Running {
            info!("Closed {} window", self.interface);
        }
        self.state = SessionState::Stopped;
    }

    /// Drive the session until the window is closed or the interface goes away.
    ///
    /// Every tick takes a sample and redraws. Key presses are handled as they
    /// arrive, so closing does not wait for the next tick.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> RssiResult<SessionEnd> {
        self.start()?;
        let mut end = SessionEnd::Closed;
        self.draw(terminal)?;

        while self.is_running() {
            let Some(event) = events.next().await else {
                self.stop();
                break;
            };

            match event {
                Event::Tick => match self.poll().await {
                    Ok(_) => {}
                    Err(e @ RssiError::Timeout { .. }) => {
                        warn!("{}", e);
                        end = SessionEnd::TimedOut;
                        self.stop();
                    }
                    Err(e) => {
                        warn!("Configured interface {} lost. {}", self.interface, e);
                        end = SessionEnd::InterfaceLost;
                        self.stop();
                    }
                },
                ev if ev.is_close() => self.stop(),
                _ => {}
            }

            if self.is_running() {
                self.draw(terminal)?;
            }
        }

        Ok(end)
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> RssiResult<()> {
        terminal.draw(|f| ui::monitor::render(f, self))?;
        Ok(())
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn last_sample(&self) -> Option<&Sample> {
        self.last.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn tick_secs(&self) -> f64 {
        self.tick_secs
    }

    /// Chart title, e.g. `wlan0: home, 2.412 GHz, IEEE 802.11`.
    pub fn title(&self) -> String {
        format!("{}: {}", self.interface, self.identity)
    }

    /// The text block under the chart.
    pub fn summary(&self) -> Vec<String> {
        match &self.last {
            Some(sample) => summary_lines(sample),
            None => vec!["Waiting for first sample".to_string()],
        }
    }
}

/// Signal line with dBm and power, then quality, noise and bitrate.
pub fn summary_lines(sample: &Sample) -> Vec<String> {
    let dbm = u8_to_dbm(sample.signal_level);
    vec![
        format!(
            "Signal: {} (dbm: {} Power: {})",
            sample.signal_level,
            dbm,
            dbm_to_units(f64::from(dbm))
        ),
        format!(
            "Quality: {}  Noise: {}  Bitrate: {}",
            sample.quality,
            sample.noise_level,
            bitrate_label(sample.bitrate)
        ),
    ]
}

/// Interfaces to try, in order: the requested one, then every detected one.
pub fn candidates(requested: Option<&str>, detected: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if let Some(name) = requested.map(str::trim).filter(|n| !n.is_empty()) {
        out.push(name.to_string());
    }
    for name in detected {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

/// Open a session on the first candidate that reports an identity.
///
/// Failures are collected and returned together if no candidate works.
pub async fn open_first<S>(
    sampler: Arc<S>,
    candidates: &[String],
    config: &Config,
) -> RssiResult<DisplaySession<S>>
where
    S: Sampler + Send + Sync + 'static,
{
    if candidates.is_empty() {
        return Err(RssiError::NoUsableInterface(vec![
            "no wireless interfaces found".to_string(),
        ]));
    }

    let mut failures = Vec::new();
    for (i, name) in candidates.iter().enumerate() {
        if i > 0 {
            warn!("Not a valid Wifi interface, trying: {}", name);
        }
        match DisplaySession::open(Arc::clone(&sampler), name, config).await {
            Ok(session) => return Ok(session),
            Err(e) => {
                info!("Interface {} is not connected.", name);
                failures.push(e.to_string());
            }
        }
    }
    Err(RssiError::NoUsableInterface(failures))
}

/// Candidates that come after `current` in `candidates`.
pub fn after<'a>(candidates: &'a [String], current: &str) -> &'a [String] {
    match candidates.iter().position(|c| c == current) {
        Some(i) => &candidates[i + 1..],
        None => &[],
    }
}

/// Run `first`, then keep going down `candidates` while interfaces are lost.
///
/// A closed window or a timeout ends the rotation. When an interface is lost
/// the next candidate that opens gets a session of its own. Returns every
/// interface that ran, with how its session ended.
pub async fn run_all<S, B>(
    first: DisplaySession<S>,
    candidates: &[String],
    config: &Config,
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
) -> RssiResult<Vec<(String, SessionEnd)>>
where
    S: Sampler + Send + Sync + 'static,
    B: Backend,
{
    let mut outcomes = Vec::new();
    let mut session = first;
    loop {
        let end = session.run(terminal, events).await?;
        outcomes.push((session.interface().to_string(), end));
        if end != SessionEnd::InterfaceLost {
            break;
        }

        let rest = after(candidates, session.interface());
        if rest.is_empty() {
            break;
        }
        match open_first(Arc::clone(&session.sampler), rest, config).await {
            Ok(next) => {
                info!("Moving on to {}", next.interface());
                session = next;
            }
            Err(e) => {
                info!("No further interface to monitor: {}", e);
                break;
            }
        }
    }
    Ok(outcomes)
}
