use clap::ValueEnum;
use crossterm::style::Color;

/// Theme names accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    HighContrast,
}

impl ThemeName {
    pub fn next(self) -> Self {
        match self {
            ThemeName::Dark => ThemeName::Light,
            ThemeName::Light => ThemeName::HighContrast,
            ThemeName::HighContrast => ThemeName::Dark,
        }
    }
}

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Border around empty slots and tray cells
    pub border: Color,
    /// Fill of an empty slot
    pub slot_bg: Color,
    /// Cursor outline
    pub cursor: Color,
    /// Slot under the held piece
    pub highlight: Color,
    /// Success/complete color
    pub success: Color,
    /// Info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
    /// Message bar background
    pub message_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            slot_bg: Color::Rgb { r: 32, g: 34, b: 46 },
            cursor: Color::Rgb { r: 255, g: 210, b: 100 },
            highlight: Color::Rgb { r: 80, g: 180, b: 255 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
            message_bg: Color::Rgb { r: 70, g: 90, b: 140 },
        }
    }

    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            slot_bg: Color::Rgb { r: 230, g: 232, b: 242 },
            cursor: Color::Rgb { r: 200, g: 120, b: 20 },
            highlight: Color::Rgb { r: 30, g: 100, b: 200 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
            message_bg: Color::Rgb { r: 180, g: 200, b: 255 },
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            slot_bg: Color::Rgb { r: 20, g: 20, b: 20 },
            cursor: Color::Yellow,
            highlight: Color::Cyan,
            success: Color::Green,
            info: Color::Grey,
            key: Color::Yellow,
            message_bg: Color::Blue,
        }
    }
}
