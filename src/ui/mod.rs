pub mod monitor;
pub mod overlap;
pub mod theme;

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Render a one-line key hint bar, e.g. ` q Quit │`
pub fn render_key_hints(f: &mut Frame, keys: &[(&str, &str)], extra: Option<String>, area: Rect) {
    let mut spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), theme::style_key_hint()),
                Span::styled(format!("{} ", desc), theme::style_key_desc()),
                Span::styled("│", theme::style_border()),
            ]
        })
        .collect();
    if let Some(extra) = extra {
        spans.push(Span::styled(format!(" {}", extra), theme::style_dim()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
