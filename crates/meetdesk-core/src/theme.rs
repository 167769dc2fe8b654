//! Theme preset: a primary palette plus semantic highlight tokens per color scheme.
//!
//! Semantic tokens reference palette shades as `{primary.<shade>}` and are
//! resolved to concrete colors when a front end builds its styles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Unresolved semantic highlight tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightTokens {
    pub background: &'static str,
    pub color: &'static str,
}

/// Highlight tokens resolved against the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub background: Rgb,
    pub color: Rgb,
}

/// Emerald scale used as the primary palette of the Aura base
const AURA_PRIMARY: [(u16, Rgb); 11] = [
    (50, Rgb(236, 253, 245)),
    (100, Rgb(209, 250, 229)),
    (200, Rgb(167, 243, 208)),
    (300, Rgb(110, 231, 183)),
    (400, Rgb(52, 211, 153)),
    (500, Rgb(16, 185, 129)),
    (600, Rgb(5, 150, 105)),
    (700, Rgb(4, 120, 87)),
    (800, Rgb(6, 95, 70)),
    (900, Rgb(6, 78, 59)),
    (950, Rgb(2, 44, 34)),
];

#[derive(Debug, Clone)]
pub struct ThemePreset {
    primary: Vec<(u16, Rgb)>,
    light: HighlightTokens,
    dark: HighlightTokens,
}

impl ThemePreset {
    /// The Aura base with highlight overrides for both schemes.
    pub fn aura() -> Self {
        Self {
            primary: AURA_PRIMARY.to_vec(),
            light: HighlightTokens {
                background: "{primary.50}",
                color: "{primary.700}",
            },
            dark: HighlightTokens {
                background: "{primary.200}",
                color: "{primary.900}",
            },
        }
    }

    pub fn tokens(&self, scheme: ColorScheme) -> HighlightTokens {
        match scheme {
            ColorScheme::Light => self.light,
            ColorScheme::Dark => self.dark,
        }
    }

    /// Primary shade, e.g. `primary(500)`
    pub fn primary(&self, shade: u16) -> Option<Rgb> {
        self.primary
            .iter()
            .find(|(s, _)| *s == shade)
            .map(|(_, rgb)| *rgb)
    }

    /// Resolve a `{primary.<shade>}` reference. Anything else is `None`.
    pub fn resolve(&self, reference: &str) -> Option<Rgb> {
        let inner = reference.strip_prefix('{')?.strip_suffix('}')?;
        let (family, shade) = inner.split_once('.')?;
        if family != "primary" {
            return None;
        }
        self.primary(shade.parse().ok()?)
    }

    pub fn highlight(&self, scheme: ColorScheme) -> Option<Highlight> {
        let tokens = self.tokens(scheme);
        Some(Highlight {
            background: self.resolve(tokens.background)?,
            color: self.resolve(tokens.color)?,
        })
    }
}

impl Default for ThemePreset {
    fn default() -> Self {
        Self::aura()
    }
}
