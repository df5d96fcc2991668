use serde::{Deserialize, Serialize};

/// A `0xRRGGBB` color, stored the way it is written in config and code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self(0xffffff);
    pub const BLACK: Self = Self(0x000000);
    pub const RED: Self = Self(0xff0000);
    pub const GREEN: Self = Self(0x00ff00);
    pub const BLUE: Self = Self(0x0000ff);
    pub const YELLOW: Self = Self(0xffff00);

    pub const fn hex(&self) -> u32 {
        self.0 & 0x00ff_ffff
    }

    /// Channels in 0..=1, gamma-encoded as written.
    pub fn to_srgb(&self) -> [f32; 3] {
        let v = self.hex();
        [
            ((v >> 16) & 0xff) as f32 / 255.0,
            ((v >> 8) & 0xff) as f32 / 255.0,
            (v & 0xff) as f32 / 255.0,
        ]
    }

    /// Channels converted to linear light, for writing into sRGB targets.
    pub fn to_linear(&self) -> [f32; 3] {
        self.to_srgb().map(srgb_to_linear)
    }

    pub fn with_alpha(&self, alpha: f32) -> [f32; 4] {
        let [r, g, b] = self.to_linear();
        [r, g, b, alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.hex())
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else if c >= 1.0 {
        1.0
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
