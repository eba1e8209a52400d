use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::overlap::OverlapPlot;
use crate::ui::theme;

/// Legend names longer than this are cut
const MAX_LABEL_WIDTH: usize = 20;

/// Draw the access point chart with its key hint line.
pub fn render(f: &mut Frame, plot: &OverlapPlot, interface: &str, remaining_secs: u64) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(f.area());

    render_chart(f, plot, interface, chunks[0]);

    let mut status = format!(
        "{} access points, closing in {}s",
        plot.traces.len(),
        remaining_secs
    );
    if !plot.skipped.is_empty() {
        status.push_str(&format!(", {} off chart", plot.skipped.len()));
    }
    super::render_key_hints(f, &[("q", "Quit")], Some(status), chunks[1]);
}

fn render_chart(f: &mut Frame, plot: &OverlapPlot, interface: &str, area: Rect) {
    let datasets: Vec<Dataset> = plot
        .traces
        .iter()
        .enumerate()
        .map(|(i, trace)| {
            Dataset::default()
                .name(label(&trace.essid, trace.channel))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::ap_color(i)))
                .data(&trace.points)
        })
        .collect();

    let width = plot.width as f64;
    let y_max = plot.y_max();
    let x_labels: Vec<Line> = (1..=plot.width)
        .step_by(plot.width.div_ceil(8).max(1))
        .map(|ch| Line::from(ch.to_string()))
        .collect();

    let title = if plot.skipped.is_empty() {
        Span::styled(format!(" Access Points ({}) ", interface), theme::style_title())
    } else {
        Span::styled(
            format!(
                " Access Points ({}), skipped: {} ",
                interface,
                plot.skipped
                    .iter()
                    .map(|s| s.essid.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            theme::style_warning(),
        )
    };

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::style_border())
                .title(title),
        )
        .x_axis(
            Axis::default()
                .title("Channel")
                .style(theme::style_dim())
                .bounds([0.0, width + 1.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Signal Level")
                .style(theme::style_dim())
                .bounds([0.0, y_max])
                .labels(vec![
                    Line::from("0"),
                    Line::from(format!("{}", (y_max / 2.0).round())),
                    Line::from(format!("{}", y_max)),
                ]),
        )
        .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(80)));

    f.render_widget(chart, area);
}

/// `essid (ch N)`, with long or empty names shortened for the legend.
fn label(essid: &str, channel: usize) -> String {
    let name = if essid.is_empty() { "<hidden>" } else { essid };
    let name = if name.width() > MAX_LABEL_WIDTH {
        let mut cut = String::new();
        for c in name.chars() {
            if cut.width() + 1 >= MAX_LABEL_WIDTH {
                break;
            }
            cut.push(c);
        }
        cut.push('…');
        cut
    } else {
        name.to_string()
    };
    format!("{} (ch {})", name, channel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_bounded() {
        assert_eq!(label("home", 6), "home (ch 6)");
        assert_eq!(label("", 1), "<hidden> (ch 1)");
        let long = label("a-network-name-that-goes-on-and-on", 11);
        assert!(long.starts_with("a-network-name-that"));
        assert!(long.contains('…'));
        assert!(long.ends_with("(ch 11)"));
    }
}
