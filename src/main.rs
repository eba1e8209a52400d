use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};

use wifirssi::event::EventHandler;
use wifirssi::session::{self, SessionEnd};
use wifirssi::wireless::{run_detached, LinuxSampler, Sampler};
use wifirssi::{logging, tui, Config};

/// wifirssi: graph wifi link quality, signal level, bitrate and noise
#[derive(Parser, Debug)]
#[command(name = "wifirssi", version, about, long_about = None)]
struct Cli {
    /// Interface to monitor (every wireless interface is tried if missing or unusable)
    interface: Option<String>,

    /// Sample interval in milliseconds
    #[arg(short, long, hide = true, default_value_t = wifirssi::config::DEFAULT_TICK_RATE_MS)]
    tick_rate: u64,

    /// Log file path (logging disabled if not specified)
    #[arg(short, long)]
    log: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tui::install_panic_hook();

    let config = Config {
        tick_rate: Duration::from_millis(cli.tick_rate.max(1)),
        log_file: cli.log.clone(),
        ..Default::default()
    };

    let _log_guard = logging::init_tui(config.log_file.as_deref())?;
    info!("wifirssi starting");

    // A sampler call stuck in the kernel must not hold up the exit
    let outcomes = run_detached(monitor(cli, config.clone()))??;

    for (interface, end) in outcomes {
        match end {
            SessionEnd::Closed => println!("Closed {} window", interface),
            SessionEnd::InterfaceLost => println!("Configured interface {} lost.", interface),
            SessionEnd::TimedOut => println!(
                "Interface {} stopped answering after {:?}.",
                interface, config.sample_timeout
            ),
        }
    }

    info!("wifirssi exiting");
    Ok(())
}

async fn monitor(cli: Cli, config: Config) -> Result<Vec<(String, SessionEnd)>> {
    let sampler = Arc::new(LinuxSampler::new());
    let detected = match sampler.list_interfaces() {
        Ok(names) => names,
        Err(e) => {
            warn!("Could not list wireless interfaces: {}", e);
            Vec::new()
        }
    };
    let candidates = session::candidates(cli.interface.as_deref(), &detected);

    // Open before touching the terminal so failures print plainly
    let first = match session::open_first(sampler, &candidates, &config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("Connect to a wireless network and try again.");
            std::process::exit(1);
        }
    };

    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(config.tick_rate);
    let outcomes = session::run_all(first, &candidates, &config, &mut terminal, &mut events).await;
    events.stop();
    tui::restore(&mut terminal)?;

    Ok(outcomes?)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn help_shows_interface_and_log_only() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("[INTERFACE]"));
        assert!(help.contains("--log"));
        assert!(!help.contains("--tick-rate"));
    }

    #[test]
    fn tuning_flag_still_parses() {
        let cli = Cli::try_parse_from(["wifirssi", "wlan0", "--tick-rate", "100"]).unwrap();
        assert_eq!(cli.interface.as_deref(), Some("wlan0"));
        assert_eq!(cli.tick_rate, 100);
        let cli = Cli::try_parse_from(["wifirssi"]).unwrap();
        assert_eq!(cli.tick_rate, wifirssi::config::DEFAULT_TICK_RATE_MS);
    }
}
