use ratatui::backend::TestBackend;
use ratatui::Terminal;

use wifirssi::overlap::{OverlapPlot, CHART_WIDTH};
use wifirssi::snapshot;
use wifirssi::ui;
use wifirssi::wireless::{AccessPoint, ChannelInfo};

fn channels() -> ChannelInfo {
    ChannelInfo::new((0..24).map(|i| (2412.0 + 5.0 * i as f64) * 1e6).collect())
}

fn ap(essid: &str, channel: usize, level: i32) -> AccessPoint {
    AccessPoint {
        essid: essid.to_string(),
        frequency_hz: (2412.0 + 5.0 * (channel - 1) as f64) * 1e6,
        signal_level: level,
    }
}

#[test]
fn snapshot_to_chart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scanresults.json");
    snapshot::save(
        &path,
        &[
            ap("first", 1, 200),
            ap("sixteenth", 16, 180),
            ap("seventeenth", 17, 170),
            ap("far-away", 22, 160),
        ],
    )
    .unwrap();

    let access_points = snapshot::load(&path).unwrap();
    let plot = OverlapPlot::build(&access_points, &channels(), CHART_WIDTH);

    let plotted: Vec<_> = plot.traces.iter().map(|t| (t.essid.as_str(), t.channel)).collect();
    assert_eq!(plotted, vec![("first", 1), ("sixteenth", 16)]);
    let skipped: Vec<_> = plot.skipped.iter().map(|s| s.essid.as_str()).collect();
    assert_eq!(skipped, vec!["seventeenth", "far-away"]);

    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal
        .draw(|f| ui::overlap::render(f, &plot, "wlan0", 60))
        .unwrap();
    let screen: String = terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect();
    assert!(screen.contains("Access Points (wlan0)"));
    assert!(screen.contains("2 off chart"));
}

#[test]
fn empty_snapshot_renders() {
    let plot = OverlapPlot::build(&[], &channels(), CHART_WIDTH);
    let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
    terminal
        .draw(|f| ui::overlap::render(f, &plot, "wlan0", 5))
        .unwrap();
    assert!(plot.traces.is_empty());
}
