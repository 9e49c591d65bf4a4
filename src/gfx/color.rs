//! RGBA colours and the game palette

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Same colour ignoring alpha (used for colour-key comparison)
    #[inline]
    pub fn same_rgb(&self, other: Color) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }
}

impl From<image::Rgba<u8>> for Color {
    fn from(p: image::Rgba<u8>) -> Self {
        let [r, g, b, a] = p.0;
        Self { r, g, b, a }
    }
}

impl From<Color> for image::Rgba<u8> {
    fn from(c: Color) -> Self {
        image::Rgba([c.r, c.g, c.b, c.a])
    }
}

pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const GREEN: Color = Color::rgb(0, 255, 0);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const CYAN: Color = Color::rgb(0, 255, 255);
pub const MAGENTA: Color = Color::rgb(255, 0, 255);
pub const YELLOW: Color = Color::rgb(255, 255, 0);

pub const GAME_BORDER: Color = Color::rgb(85, 85, 85);
pub const SMOKE: Color = Color::rgb(40, 40, 40);
pub const TANK_BG_COLOR: Color = Color::rgba(64, 0, 0, 255);
