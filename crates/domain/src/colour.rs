//! RGB colour values and their wire encodings.
//!
//! Two hex encodings exist on the wire:
//!
//! - plain 6-character `rrggbb`, used inside flash-scene records
//! - the 14-character colour DP value `rrggbb hhhh ss vv` (RGB followed by
//!   HSV with hue in degrees), written when switching the bulb to colour mode

use serde::{Deserialize, Serialize};

/// Width of a plain colour field on the wire.
pub const COLOUR_HEX_LEN: usize = 6;

/// Width of the colour DP value (RGB followed by HSV).
pub const DEVICE_COLOUR_HEX_LEN: usize = 14;

/// An RGB colour triple, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Decode a 6-character `rrggbb` hex string.
    ///
    /// Any other width, or non-hex input, yields `None` (malformed device
    /// data degrades to absent, it never errors).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != COLOUR_HEX_LEN {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Decode a colour value as the device reports it: either the plain
    /// 6-character `rrggbb` form or the 14-character colour DP value, whose
    /// leading 6 characters carry the RGB triple (the HSV tail is redundant
    /// on read). Any other width yields `None`.
    #[must_use]
    pub fn from_device_hex(hex: &str) -> Option<Self> {
        match hex.len() {
            COLOUR_HEX_LEN => Self::from_hex(hex),
            DEVICE_COLOUR_HEX_LEN => Self::from_hex(hex.get(..COLOUR_HEX_LEN)?),
            _ => None,
        }
    }

    /// Encode as a 6-character lowercase `rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Encode as the 14-character colour DP value: RGB hex followed by HSV
    /// hex (`hhhh` in degrees 0–359, `ss`/`vv` on the 0–255 scale).
    #[must_use]
    pub fn to_device_hex(self) -> String {
        let (h, s, v) = self.to_hsv();
        format!("{}{h:04x}{s:02x}{v:02x}", self.to_hex())
    }

    /// Convert to HSV with hue in degrees and saturation/value as bytes.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_hsv(self) -> (u16, u8, u8) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let delta = f64::from(max - min);

        let value = max;
        let saturation = if max == 0 {
            0
        } else {
            (delta / f64::from(max) * 255.0).round() as u8
        };

        if delta == 0.0 {
            return (0, saturation, value);
        }

        let (r, g, b) = (f64::from(self.r), f64::from(self.g), f64::from(self.b));
        let mut hue = if max == self.r {
            60.0 * ((g - b) / delta)
        } else if max == self.g {
            60.0 * ((b - r) / delta) + 120.0
        } else {
            60.0 * ((r - g) / delta) + 240.0
        };
        if hue < 0.0 {
            hue += 360.0;
        }

        (hue.round() as u16 % 360, saturation, value)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

/// The fixed set of named colours exposed as capability calls, a closed
/// statically dispatched table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColour {
    Green,
    Yellow,
    Orange,
    Red,
    Blue,
    Cyan,
    Purple,
    Magenta,
    Grey,
}

impl NamedColour {
    pub const ALL: [Self; 9] = [
        Self::Green,
        Self::Yellow,
        Self::Orange,
        Self::Red,
        Self::Blue,
        Self::Cyan,
        Self::Purple,
        Self::Magenta,
        Self::Grey,
    ];

    /// The RGB value bound to this name.
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Green => Rgb::new(0, 255, 0),
            Self::Yellow => Rgb::new(255, 255, 0),
            Self::Orange => Rgb::new(255, 128, 0),
            Self::Red => Rgb::new(255, 0, 0),
            Self::Blue => Rgb::new(0, 0, 255),
            Self::Cyan => Rgb::new(0, 255, 255),
            Self::Purple => Rgb::new(127, 0, 255),
            Self::Magenta => Rgb::new(255, 0, 255),
            Self::Grey => Rgb::new(128, 128, 128),
        }
    }
}

impl std::fmt::Display for NamedColour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Cyan => "cyan",
            Self::Purple => "purple",
            Self::Magenta => "magenta",
            Self::Grey => "grey",
        };
        f.write_str(name)
    }
}
