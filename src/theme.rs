//! Background themes. The browser page swapped a full-screen image; in the
//! terminal a theme is an accent palette applied to the page chrome.

use ratzilla::ratatui::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FarmTheme {
    Spring,
    Summer,
    Autumn,
    Winter,
    Sunny,
    Rainy,
    Cloudy,
    Snow,
    Night,
}

pub const ALL_THEMES: [FarmTheme; 9] = [
    FarmTheme::Spring,
    FarmTheme::Summer,
    FarmTheme::Autumn,
    FarmTheme::Winter,
    FarmTheme::Sunny,
    FarmTheme::Rainy,
    FarmTheme::Cloudy,
    FarmTheme::Snow,
    FarmTheme::Night,
];

/// Colors used by the tab bar, borders and headings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub accent: Color,
    pub border: Color,
    pub text: Color,
}

pub const DEFAULT_PALETTE: Palette = Palette {
    accent: Color::Green,
    border: Color::DarkGray,
    text: Color::White,
};

impl FarmTheme {
    /// Value stored under the `farmTheme` key.
    pub fn key(self) -> &'static str {
        match self {
            FarmTheme::Spring => "spring",
            FarmTheme::Summer => "summer",
            FarmTheme::Autumn => "autumn",
            FarmTheme::Winter => "winter",
            FarmTheme::Sunny => "sunny",
            FarmTheme::Rainy => "rainy",
            FarmTheme::Cloudy => "cloudy",
            FarmTheme::Snow => "snow",
            FarmTheme::Night => "night",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ALL_THEMES.iter().copied().find(|t| t.key() == key)
    }

    pub fn name(self) -> &'static str {
        match self {
            FarmTheme::Spring => "春天",
            FarmTheme::Summer => "夏天",
            FarmTheme::Autumn => "秋天",
            FarmTheme::Winter => "冬天",
            FarmTheme::Sunny => "晴天",
            FarmTheme::Rainy => "雨天",
            FarmTheme::Cloudy => "陰天",
            FarmTheme::Snow => "下雪",
            FarmTheme::Night => "夜晚",
        }
    }

    pub fn palette(self) -> Palette {
        let (accent, border) = match self {
            FarmTheme::Spring => (Color::LightGreen, Color::Green),
            FarmTheme::Summer => (Color::LightYellow, Color::Yellow),
            FarmTheme::Autumn => (Color::LightRed, Color::Red),
            // Snow reuses the winter artwork.
            FarmTheme::Winter | FarmTheme::Snow => (Color::White, Color::LightCyan),
            FarmTheme::Sunny => (Color::Yellow, Color::LightYellow),
            FarmTheme::Rainy => (Color::LightBlue, Color::Blue),
            FarmTheme::Cloudy => (Color::Gray, Color::DarkGray),
            FarmTheme::Night => (Color::LightMagenta, Color::Blue),
        };
        Palette {
            accent,
            border,
            text: Color::White,
        }
    }
}

pub fn palette_for(theme: Option<FarmTheme>) -> Palette {
    theme.map_or(DEFAULT_PALETTE, FarmTheme::palette)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for theme in ALL_THEMES {
            assert_eq!(FarmTheme::from_key(theme.key()), Some(theme));
        }
    }

    #[test]
    fn unknown_key_is_no_theme() {
        assert_eq!(FarmTheme::from_key("volcano"), None);
        assert_eq!(FarmTheme::from_key(""), None);
        assert_eq!(palette_for(None), DEFAULT_PALETTE);
    }

    #[test]
    fn snow_shares_winter_palette() {
        assert_eq!(FarmTheme::Snow.palette(), FarmTheme::Winter.palette());
    }
}
