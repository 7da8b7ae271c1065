//! Color themes for the canvas puzzle

use serde::{Deserialize, Serialize};

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn as_css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    pub fn as_css_alpha(&self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    /// Panels behind preview, board and tray
    pub panel_bg: Color,
    pub slot_bg: Color,
    pub slot_border: Color,
    /// Outline of the slot under a dragged piece
    pub highlight: Color,
    pub tray_cell_bg: Color,
    pub title_text: Color,
    pub info_text: Color,
    pub message_text: Color,
    pub win_color: Color,
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            background: Color::new(24, 24, 32),
            panel_bg: Color::new(32, 32, 44),
            slot_bg: Color::new(40, 40, 54),
            slot_border: Color::new(70, 70, 96),
            highlight: Color::new(100, 180, 255),
            tray_cell_bg: Color::new(36, 36, 50),
            title_text: Color::new(200, 200, 220),
            info_text: Color::new(160, 160, 180),
            message_text: Color::new(255, 220, 100),
            win_color: Color::new(100, 255, 150),
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::new(245, 245, 250),
            panel_bg: Color::new(255, 255, 255),
            slot_bg: Color::new(232, 234, 242),
            slot_border: Color::new(180, 180, 200),
            highlight: Color::new(30, 100, 200),
            tray_cell_bg: Color::new(240, 240, 246),
            title_text: Color::new(20, 20, 40),
            info_text: Color::new(60, 60, 80),
            message_text: Color::new(180, 120, 0),
            win_color: Color::new(50, 180, 80),
        }
    }

    pub fn high_contrast() -> Self {
        Self {
            background: Color::new(0, 0, 0),
            panel_bg: Color::new(0, 0, 0),
            slot_bg: Color::new(20, 20, 20),
            slot_border: Color::new(255, 255, 255),
            highlight: Color::new(0, 255, 255),
            tray_cell_bg: Color::new(10, 10, 10),
            title_text: Color::new(255, 255, 255),
            info_text: Color::new(200, 200, 200),
            message_text: Color::new(255, 255, 0),
            win_color: Color::new(0, 255, 0),
        }
    }

    /// Theme by name, falling back to dark
    pub fn by_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "high_contrast" | "high-contrast" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}
