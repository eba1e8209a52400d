use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use wifirssi::wireless::LinuxSampler;
use wifirssi::{logging, scan, snapshot};

/// Scan for access points and store the results for wifirssi-map
#[derive(Parser, Debug)]
#[command(name = "wifirssi-scan", version, about, long_about = None)]
struct Cli {
    /// Wireless interface to scan with
    interface: String,

    /// Snapshot file to write
    #[arg(short, long, hide = true, default_value = wifirssi::config::DEFAULT_SNAPSHOT_PATH)]
    output: PathBuf,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::init_stderr();

    let sampler = LinuxSampler::new();
    let access_points = scan::capture(&sampler, &cli.interface)?;

    snapshot::save(&cli.output, &access_points)
        .wrap_err_with(|| format!("Failed to write scan results to {}", cli.output.display()))?;
    println!(
        "{} access points written to {}",
        access_points.len(),
        cli.output.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn help_shows_interface_only() {
        let help = Cli::command().render_help().to_string();
        assert!(help.contains("<INTERFACE>"));
        assert!(!help.contains("--output"));
    }

    #[test]
    fn writes_next_to_the_map_tool_by_default() {
        let cli = Cli::try_parse_from(["wifirssi-scan", "wlan0"]).unwrap();
        assert_eq!(cli.output, PathBuf::from(wifirssi::config::DEFAULT_SNAPSHOT_PATH));
    }
}
