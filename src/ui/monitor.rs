use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::session::DisplaySession;
use crate::ui::theme;
use crate::wireless::Sampler;

/// Draw the live monitor: chart, summary text, key hints.
pub fn render<S>(f: &mut Frame, session: &DisplaySession<S>)
where
    S: Sampler + Send + Sync + 'static,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // Chart
            Constraint::Length(4), // Summary
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    render_chart(f, session, chunks[0]);
    render_summary(f, session, chunks[1]);

    let metrics = session.metrics();
    let samples = format!(
        "{} samples, ceilings {}/{}/{}/{}",
        metrics.quality.ingested(),
        metrics.quality.max_value(),
        metrics.signal_level.max_value(),
        metrics.bitrate.max_value(),
        metrics.noise.max_value()
    );
    super::render_key_hints(f, &[("q", "Quit")], Some(samples), chunks[2]);
}

fn render_chart<S>(f: &mut Frame, session: &DisplaySession<S>, area: Rect)
where
    S: Sampler + Send + Sync + 'static,
{
    let metrics = session.metrics();
    let series: Vec<_> = metrics
        .iter()
        .map(|(metric, buffer)| (metric, buffer.points()))
        .collect();

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(metric, points)| {
            Dataset::default()
                .name(metric.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(ratatui::style::Style::default().fg(theme::metric_color(*metric)))
                .data(points)
        })
        .collect();

    let width = metrics.quality.capacity() as f64;
    let height = metrics.quality.display_height();

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::style_border())
                .title(Span::styled(format!(" {} ", session.title()), theme::style_title())),
        )
        .x_axis(
            Axis::default()
                .title(format!("Sample per {} sec", session.tick_secs()))
                .style(theme::style_dim())
                .bounds([0.0, (width - 1.0).max(1.0)])
                .labels(vec![
                    Line::from("0"),
                    Line::from(format!("{}", width as usize)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Percentage of capacity.")
                .style(theme::style_dim())
                .bounds([0.0, height])
                .labels(vec![
                    Line::from("0"),
                    Line::from(format!("{}", (height / 2.0).round())),
                    Line::from(format!("{}", height)),
                ]),
        )
        .hidden_legend_constraints((Constraint::Percentage(50), Constraint::Percentage(50)));

    f.render_widget(chart, area);
}

fn render_summary<S>(f: &mut Frame, session: &DisplaySession<S>, area: Rect)
where
    S: Sampler + Send + Sync + 'static,
{
    let lines: Vec<Line> = session
        .summary()
        .into_iter()
        .map(|l| Line::from(Span::styled(l, theme::style_default())))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::style_border())
        .title(Span::styled(" wifi info ", theme::style_title()));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
