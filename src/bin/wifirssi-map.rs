use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio::time::Instant;
use tracing::info;

use wifirssi::event::{Event, EventHandler};
use wifirssi::overlap::{OverlapPlot, CHART_WIDTH};
use wifirssi::wireless::{bounded, run_detached, LinuxSampler, Sampler};
use wifirssi::{logging, snapshot, tui, ui, Config};

/// Plot access point signal levels per channel from a wifirssi-scan snapshot
#[derive(Parser, Debug)]
#[command(name = "wifirssi-map", version, about, long_about = None)]
struct Cli {
    /// Wireless interface whose channel list is used
    interface: String,

    /// Snapshot file to read
    #[arg(short, long, hide = true, default_value = wifirssi::config::DEFAULT_SNAPSHOT_PATH)]
    input: PathBuf,

    /// Seconds the chart stays on screen
    #[arg(short, long, hide = true, default_value_t = wifirssi::config::DEFAULT_OVERLAP_DISPLAY_SECS)]
    duration: u64,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tui::install_panic_hook();

    let config = Config {
        snapshot_path: cli.input.clone(),
        overlap_display: Duration::from_secs(cli.duration),
        log_file: cli.log.clone(),
        ..Default::default()
    };
    let _log_guard = logging::init_tui(config.log_file.as_deref())?;

    // Returning must not wait on a channel query stuck in the kernel
    let plot = run_detached(show(cli, config))??;

    for skipped in &plot.skipped {
        match skipped.channel {
            Some(ch) => eprintln!("Channel: {} not in 2.4Ghz ({})", ch, skipped.essid),
            None => eprintln!(
                "{}: frequency {} Hz is not a known channel",
                skipped.essid, skipped.frequency_hz
            ),
        }
    }
    Ok(())
}

async fn show(cli: Cli, config: Config) -> Result<OverlapPlot> {
    let access_points = snapshot::load(&config.snapshot_path).wrap_err_with(|| {
        format!(
            "Failed to read scan results from {} (run wifirssi-scan first)",
            config.snapshot_path.display()
        )
    })?;

    let sampler = Arc::new(LinuxSampler::new());
    let channels = {
        let sampler = Arc::clone(&sampler);
        let iface = cli.interface.clone();
        bounded(config.sample_timeout, &cli.interface, move || {
            sampler.channel_info(&iface)
        })
        .await?
    };

    let plot = OverlapPlot::build(&access_points, &channels, CHART_WIDTH);
    info!(
        "{} access points plotted, {} skipped",
        plot.traces.len(),
        plot.skipped.len()
    );

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(Duration::from_secs(1));
    let deadline = Instant::now() + config.overlap_display;

    let shown: Result<()> = async {
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now()).as_secs();
            terminal.draw(|f| ui::overlap::render(f, &plot, &cli.interface, remaining))?;

            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => break,
                event = events.next() => match event {
                    Some(ev) if ev.is_close() => break,
                    Some(Event::Tick) | Some(Event::Resize(..)) | Some(Event::Key(_)) => {}
                    None => break,
                },
            }
        }
        Ok(())
    }
    .await;

    events.stop();
    tui::restore(&mut terminal)?;
    shown?;

    Ok(plot)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn help_shows_interface_and_log_only() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("<INTERFACE>"));
        assert!(help.contains("--log"));
        assert!(!help.contains("--input"));
        assert!(!help.contains("--duration"));
    }

    #[test]
    fn defaults_match_the_scan_tool() {
        let cli = Cli::try_parse_from(["wifirssi-map", "wlan0"]).unwrap();
        assert_eq!(cli.input, PathBuf::from(wifirssi::config::DEFAULT_SNAPSHOT_PATH));
        assert_eq!(cli.duration, wifirssi::config::DEFAULT_OVERLAP_DISPLAY_SECS);
        assert!(Cli::try_parse_from(["wifirssi-map"]).is_err());
    }
}
