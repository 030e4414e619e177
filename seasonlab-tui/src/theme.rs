//! Parrot/neon theme tokens for the SeasonLab TUI
//!
//! - **Accent**: Electric cyan (curve, focus)
//! - **Positive**: Neon green (gains)
//! - **Negative**: Hot pink (losses, error banner)
//! - **Warning**: Neon orange (fetch in progress)
//! - **Muted**: Steel blue (axes, hints, zero line)

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (focus, highlights)
    pub accent: Color,
    /// Neon green (positive values, gains)
    pub positive: Color,
    /// Hot pink (negative values, losses)
    pub negative: Color,
    /// Neon orange (warnings, alerts)
    pub warning: Color,
    /// Steel blue (muted text, disabled)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (secondary text)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Gains green, losses pink. Zero counts as a gain.
    pub fn pnl_color(&self, value: f64) -> Color {
        if value >= 0.0 {
            self.positive
        } else {
            self.negative
        }
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn accent(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn banner(&self) -> Style {
        Style::default()
            .fg(self.negative)
            .add_modifier(Modifier::BOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_pnl_color() {
        let theme = Theme::default();
        assert_eq!(theme.pnl_color(1.3), theme.positive);
        assert_eq!(theme.pnl_color(-0.4), theme.negative);
        assert_eq!(theme.pnl_color(0.0), theme.positive);
    }

    #[test]
    fn test_styles_use_palette() {
        let theme = Theme::default();
        assert_eq!(theme.muted().fg, Some(theme.muted));
        assert_eq!(theme.banner().fg, Some(theme.negative));
    }
}
