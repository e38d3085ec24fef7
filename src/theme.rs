use std::path::PathBuf;
use std::sync::OnceLock;

use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::config;
use crate::holiday::HolidayCategory;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Get the active theme (loaded once on first call).
pub fn current() -> &'static Theme {
    THEME.get_or_init(|| Theme::load().unwrap_or_default())
}

// Const fallbacks used in places that need compile-time styles
pub const HEADER_STYLE: Style = Style::new()
    .fg(Color::White)
    .add_modifier(Modifier::BOLD);
pub const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

#[derive(Debug, Clone)]
pub struct Theme {
    #[allow(dead_code)]
    pub name: String,
    pub header: Style,
    pub dim: Style,
    pub border: Style,
    pub status: Style,
    pub countdown: Style,
    pub error: Style,
    pub selected: Style,
    pub tags: TagStyles,
}

/// Badge colours per holiday category. `other` covers unrecognised types.
#[derive(Debug, Clone)]
pub struct TagStyles {
    pub federal: Style,
    pub floating: Style,
    pub company: Style,
    pub observance: Style,
    pub other: Style,
}

impl TagStyles {
    pub fn for_category(&self, category: HolidayCategory) -> Style {
        match category {
            HolidayCategory::Federal => self.federal,
            HolidayCategory::Floating => self.floating,
            HolidayCategory::Company => self.company,
            HolidayCategory::Observance => self.observance,
            HolidayCategory::Other => self.other,
        }
    }

    fn badges(
        federal: Color,
        floating: Color,
        company: Color,
        observance: Color,
        other: Color,
    ) -> Self {
        let badge = |bg: Color| Style::default().fg(Color::Black).bg(bg);
        Self {
            federal: badge(federal),
            floating: badge(floating),
            company: badge(company),
            observance: badge(observance),
            other: badge(other),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            header: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::DarkGray),
            border: Style::default().fg(Color::Gray),
            status: Style::default().fg(Color::White).bg(Color::DarkGray),
            countdown: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Red),
            selected: Style::default().fg(Color::Black).bg(Color::Cyan),
            tags: TagStyles::badges(
                Color::Blue,
                Color::Green,
                Color::Magenta,
                Color::Yellow,
                Color::Gray,
            ),
        }
    }
}

impl Theme {
    pub fn load() -> Option<Self> {
        let path = theme_path()?;
        if !path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(&path).ok()?;
        match toml::from_str::<ThemeConfig>(&content) {
            Ok(config) => Some(config.into_theme()),
            Err(e) => {
                tracing::warn!(path = %path.display(), "ignoring invalid theme: {}", e);
                None
            }
        }
    }

    /// Get a built-in preset by name.
    pub fn preset(name: &str) -> Self {
        match name {
            "dracula" => Self::dracula(),
            "gruvbox" => Self::gruvbox(),
            "nord" => Self::nord(),
            _ => Self::default(),
        }
    }

    fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            header: Style::default().fg(Color::Rgb(248, 248, 242)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(98, 114, 164)),
            border: Style::default().fg(Color::Rgb(68, 71, 90)),
            status: Style::default()
                .fg(Color::Rgb(248, 248, 242))
                .bg(Color::Rgb(68, 71, 90)),
            countdown: Style::default()
                .fg(Color::Rgb(139, 233, 253)) // cyan
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Rgb(255, 85, 85)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(189, 147, 249)),
            tags: TagStyles::badges(
                Color::Rgb(189, 147, 249), // purple
                Color::Rgb(80, 250, 123),  // green
                Color::Rgb(255, 121, 198), // pink
                Color::Rgb(241, 250, 140), // yellow
                Color::Rgb(98, 114, 164),
            ),
        }
    }

    fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            header: Style::default().fg(Color::Rgb(235, 219, 178)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(146, 131, 116)),
            border: Style::default().fg(Color::Rgb(102, 92, 84)),
            status: Style::default()
                .fg(Color::Rgb(235, 219, 178))
                .bg(Color::Rgb(80, 73, 69)),
            countdown: Style::default()
                .fg(Color::Rgb(131, 165, 152)) // aqua
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Rgb(251, 73, 52)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(250, 189, 47)),
            tags: TagStyles::badges(
                Color::Rgb(131, 165, 152),
                Color::Rgb(184, 187, 38),
                Color::Rgb(211, 134, 155),
                Color::Rgb(250, 189, 47),
                Color::Rgb(146, 131, 116),
            ),
        }
    }

    fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            header: Style::default().fg(Color::Rgb(229, 233, 240)).add_modifier(Modifier::BOLD),
            dim: Style::default().fg(Color::Rgb(76, 86, 106)),
            border: Style::default().fg(Color::Rgb(67, 76, 94)),
            status: Style::default()
                .fg(Color::Rgb(229, 233, 240))
                .bg(Color::Rgb(67, 76, 94)),
            countdown: Style::default()
                .fg(Color::Rgb(136, 192, 208)) // frost
                .add_modifier(Modifier::BOLD),
            error: Style::default().fg(Color::Rgb(191, 97, 106)),
            selected: Style::default().fg(Color::Black).bg(Color::Rgb(136, 192, 208)),
            tags: TagStyles::badges(
                Color::Rgb(129, 161, 193),
                Color::Rgb(163, 190, 140),
                Color::Rgb(180, 142, 173),
                Color::Rgb(235, 203, 139),
                Color::Rgb(76, 86, 106),
            ),
        }
    }
}

fn theme_path() -> Option<PathBuf> {
    config::config_dir().map(|d| d.join("theme.toml"))
}

// ── TOML config types ──

#[derive(Debug, Deserialize, Default)]
struct ThemeConfig {
    preset: Option<String>,
    header_fg: Option<String>,
    dim_fg: Option<String>,
    border_fg: Option<String>,
    status_fg: Option<String>,
    status_bg: Option<String>,
    countdown_fg: Option<String>,
    error_fg: Option<String>,
    federal_bg: Option<String>,
    floating_bg: Option<String>,
    company_bg: Option<String>,
    observance_bg: Option<String>,
    other_bg: Option<String>,
}

impl ThemeConfig {
    fn into_theme(self) -> Theme {
        // Start from preset or default
        let mut theme = self
            .preset
            .as_deref()
            .map(Theme::preset)
            .unwrap_or_default();

        // Override individual colors
        if let Some(c) = self.header_fg.as_deref().and_then(parse_color) {
            theme.header = theme.header.fg(c);
        }
        if let Some(c) = self.dim_fg.as_deref().and_then(parse_color) {
            theme.dim = theme.dim.fg(c);
        }
        if let Some(c) = self.border_fg.as_deref().and_then(parse_color) {
            theme.border = theme.border.fg(c);
        }
        if let Some(c) = self.status_fg.as_deref().and_then(parse_color) {
            theme.status = theme.status.fg(c);
        }
        if let Some(c) = self.status_bg.as_deref().and_then(parse_color) {
            theme.status = theme.status.bg(c);
        }
        if let Some(c) = self.countdown_fg.as_deref().and_then(parse_color) {
            theme.countdown = theme.countdown.fg(c);
        }
        if let Some(c) = self.error_fg.as_deref().and_then(parse_color) {
            theme.error = theme.error.fg(c);
        }

        let tags = &mut theme.tags;
        for (slot, value) in [
            (&mut tags.federal, self.federal_bg),
            (&mut tags.floating, self.floating_bg),
            (&mut tags.company, self.company_bg),
            (&mut tags.observance, self.observance_bg),
            (&mut tags.other, self.other_bg),
        ] {
            if let Some(c) = value.as_deref().and_then(parse_color) {
                *slot = slot.bg(c);
            }
        }

        theme
    }
}

/// Parse a color string: hex "#rrggbb", or named colors.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        return Some(Color::Rgb(r, g, b));
    }
    match s.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        _ => None,
    }
}
