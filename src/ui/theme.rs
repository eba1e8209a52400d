use ratatui::style::{Color, Modifier, Style};

use crate::session::Metric;

// ─── Color Palette (terminal-adaptive, transparency-friendly) ──────────

/// Background: always Reset (transparent), follows the terminal background
pub const BG: Color = Color::Reset;

/// Primary text color
pub const FG: Color = Color::White;

/// Dimmed text (labels, axes)
pub const FG_DIM: Color = Color::DarkGray;

/// Accent color (titles, keybinding hints)
pub const ACCENT: Color = Color::Cyan;

/// Border color
pub const BORDER: Color = Color::DarkGray;

/// Warning color (skipped access points)
pub const WARNING: Color = Color::Yellow;

/// Chart line colors
pub const QUALITY: Color = Color::Blue;
pub const SIGNAL_LEVEL: Color = Color::Green;
pub const BITRATE: Color = Color::Red;
pub const NOISE: Color = Color::Yellow;

/// Access point lines cycle through these
pub const AP_PALETTE: &[Color] = &[
    Color::Cyan,
    Color::Green,
    Color::Magenta,
    Color::Yellow,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightGreen,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightRed,
];

// ─── Style Constructors ──────────────────────────────────────────────────

pub fn style_default() -> Style {
    Style::default().fg(FG).bg(BG)
}

pub fn style_dim() -> Style {
    Style::default().fg(FG_DIM).bg(BG)
}

pub fn style_title() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_border() -> Style {
    Style::default().fg(BORDER).bg(BG)
}

pub fn style_warning() -> Style {
    Style::default().fg(WARNING).bg(BG)
}

pub fn style_key_hint() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG)
        .add_modifier(Modifier::BOLD)
}

pub fn style_key_desc() -> Style {
    Style::default().fg(FG_DIM).bg(BG)
}

/// Line color of a monitor metric
pub fn metric_color(metric: Metric) -> Color {
    match metric {
        Metric::Quality => QUALITY,
        Metric::SignalLevel => SIGNAL_LEVEL,
        Metric::Bitrate => BITRATE,
        Metric::Noise => NOISE,
    }
}

/// Line color of the n-th access point
pub fn ap_color(index: usize) -> Color {
    AP_PALETTE[index % AP_PALETTE.len()]
}
