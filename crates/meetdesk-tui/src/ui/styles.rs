use ratatui::style::{Color, Modifier, Style};

use meetdesk_core::theme::{ColorScheme, Highlight, Rgb, ThemePreset};

// Fixed colors outside the preset
pub const ERROR: Color = Color::Rgb(192, 64, 64);
pub const MUTED: Color = Color::Rgb(128, 128, 128);
pub const ACCENT: Color = Color::Rgb(192, 160, 64);

/// Fallback when a preset token does not resolve
const FALLBACK_HIGHLIGHT: Highlight = Highlight {
    background: Rgb(48, 48, 64),
    color: Rgb(255, 255, 255),
};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Styles derived from the theme preset for one color scheme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub primary: Color,
    pub highlight_bg: Color,
    pub highlight_fg: Color,
    pub text: Color,
}

impl Theme {
    pub fn new(preset: &ThemePreset, scheme: ColorScheme) -> Self {
        let highlight = preset.highlight(scheme).unwrap_or(FALLBACK_HIGHLIGHT);
        let primary = preset
            .primary(500)
            .map(color)
            .unwrap_or(Color::Rgb(64, 128, 192));
        let text = match scheme {
            ColorScheme::Light => Color::Reset,
            ColorScheme::Dark => Color::White,
        };

        Self {
            primary,
            highlight_bg: color(highlight.background),
            highlight_fg: color(highlight.color),
            text,
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.primary).add_modifier(Modifier::BOLD)
    }

    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .fg(self.highlight_fg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.primary)
        } else {
            muted_style()
        }
    }
}

pub fn muted_style() -> Style {
    Style::default().fg(MUTED)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR)
}

pub fn highlight_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn status_bar_style() -> Style {
    Style::default().bg(Color::Rgb(32, 32, 40)).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}
