use std::fmt;
use std::str::FromStr;

use colored::{Color, ColoredString, Colorize};

use crate::error::ConfigError;

/// Console color theme, switchable at runtime with `color ?`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ColorTheme {
    #[default]
    WhiteHouse,
    MarALago,
    EastWing,
    Matrix,
    Monochrome,
}

/// Colors for each kind of console output. Player input keeps the terminal default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub system: Color,
    pub persona: Color,
    pub alert: Color,
}

impl ColorTheme {
    pub const ALL: [ColorTheme; 5] = [
        ColorTheme::WhiteHouse,
        ColorTheme::MarALago,
        ColorTheme::EastWing,
        ColorTheme::Matrix,
        ColorTheme::Monochrome,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTheme::WhiteHouse => "white-house",
            ColorTheme::MarALago => "mar-a-lago",
            ColorTheme::EastWing => "east-wing",
            ColorTheme::Matrix => "matrix",
            ColorTheme::Monochrome => "monochrome",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColorTheme::WhiteHouse => "White House",
            ColorTheme::MarALago => "Mar A Lago",
            ColorTheme::EastWing => "East Wing",
            ColorTheme::Matrix => "Matrix",
            ColorTheme::Monochrome => "Monochrome",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ColorTheme::WhiteHouse => "Classic elegant whites and grays (default)",
            ColorTheme::MarALago => "Garish gold and yellow (tacky luxury)",
            ColorTheme::EastWing => "Calm blues and whites (peaceful)",
            ColorTheme::Matrix => "Green terminal aesthetic (retro tech)",
            ColorTheme::Monochrome => "Simple grayscale (no colors)",
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            ColorTheme::WhiteHouse => Palette {
                system: Color::White,
                persona: Color::BrightWhite,
                alert: Color::BrightYellow,
            },
            ColorTheme::MarALago => Palette {
                system: Color::BrightYellow,
                persona: Color::Yellow,
                alert: Color::BrightRed,
            },
            ColorTheme::EastWing => Palette {
                system: Color::BrightBlue,
                persona: Color::BrightWhite,
                alert: Color::BrightYellow,
            },
            ColorTheme::Matrix => Palette {
                system: Color::BrightGreen,
                persona: Color::Green,
                alert: Color::BrightRed,
            },
            ColorTheme::Monochrome => Palette {
                system: Color::White,
                persona: Color::BrightWhite,
                alert: Color::White,
            },
        }
    }
}

impl Palette {
    pub fn system(&self, text: &str) -> ColoredString {
        text.color(self.system)
    }

    pub fn persona(&self, text: &str) -> ColoredString {
        text.color(self.persona)
    }

    pub fn alert(&self, text: &str) -> ColoredString {
        text.color(self.alert)
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorTheme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        ColorTheme::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or(ConfigError::UnknownColor(s))
    }
}
