/// Color themes and styling
use crate::app::ThemeMode;
use crate::models::Swatch;
use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    /// Highlight for active toggles and the playing row
    pub accent: Color,
    /// Bottom control bar
    pub bar: Color,
    pub border: Color,
    pub cream: Color,
    pub mustard: Color,
    pub sky: Color,
    pub blush: Color,
    pub tangerine: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color::Rgb(0xF5, 0xEE, 0xD0),
            foreground: Color::Black,
            muted: Color::Rgb(0x55, 0x55, 0x55),
            accent: Color::Rgb(0xF2, 0x8C, 0x53),
            bar: Color::Rgb(0xF9, 0xC0, 0xB9),
            border: Color::Black,
            cream: Color::Rgb(0xF5, 0xEE, 0xD0),
            mustard: Color::Rgb(0xF9, 0xD2, 0x6E),
            sky: Color::Rgb(0x8D, 0xD3, 0xE7),
            blush: Color::Rgb(0xF9, 0xC0, 0xB9),
            tangerine: Color::Rgb(0xF2, 0x8C, 0x53),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(0x1E, 0x1C, 0x18),
            foreground: Color::Rgb(0xF5, 0xEE, 0xD0),
            muted: Color::Gray,
            accent: Color::Rgb(0xF2, 0x8C, 0x53),
            bar: Color::Rgb(0x3A, 0x2E, 0x2C),
            border: Color::Rgb(0xF5, 0xEE, 0xD0),
            cream: Color::Rgb(0xC8, 0xC0, 0xA0),
            mustard: Color::Rgb(0xD9, 0xB2, 0x4E),
            sky: Color::Rgb(0x6D, 0xB3, 0xC7),
            blush: Color::Rgb(0xD9, 0xA0, 0x99),
            tangerine: Color::Rgb(0xF2, 0x8C, 0x53),
        }
    }

    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    pub fn swatch(&self, swatch: Swatch) -> Color {
        match swatch {
            Swatch::Cream => self.cream,
            Swatch::Mustard => self.mustard,
            Swatch::Sky => self.sky,
            Swatch::Blush => self.blush,
            Swatch::Tangerine => self.tangerine,
        }
    }

    pub fn base(&self) -> Style {
        Style::default().fg(self.foreground).bg(self.background)
    }

    pub fn dim(&self) -> Style {
        self.base().fg(self.muted)
    }

    pub fn title(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.background)
            .bg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }

    /// Foreground for a toggle that may be switched on
    pub fn toggle(&self, on: bool) -> Style {
        if on {
            self.base().fg(self.accent).add_modifier(Modifier::BOLD)
        } else {
            self.base()
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_for_mode() {
        assert_eq!(Theme::for_mode(ThemeMode::Dark).background, Theme::dark().background);
        assert_eq!(Theme::default().foreground, Color::Black);
    }

    #[test]
    fn test_swatches_match_palette() {
        let theme = Theme::light();
        assert_eq!(theme.swatch(Swatch::Mustard), Color::Rgb(0xF9, 0xD2, 0x6E));
        assert_eq!(theme.swatch(Swatch::Tangerine), theme.accent);
    }
}
