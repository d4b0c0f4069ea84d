//! 24-bit RGB colors in `#RRGGBB` form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ColorwizError, Result};

/// An immutable 24-bit RGB color.
///
/// The textual form is always `#` followed by six uppercase hexadecimal digits.
/// Parsing accepts lowercase digits and normalizes them, so equality of two
/// values is equality of their canonical text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor([u8; 3]);

impl HexColor {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);

    /// Create a color from its three byte components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Create a color from unchecked integer components, rejecting anything
    /// outside `0..=255`
    pub fn try_from_components(r: i64, g: i64, b: i64) -> Result<Self> {
        let byte = |c: i64| {
            u8::try_from(c).map_err(|_| ColorwizError::InvalidColor {
                value: format!("({}, {}, {})", r, g, b),
                message: format!("component {} is outside 0..=255", c),
            })
        };
        Ok(Self([byte(r)?, byte(g)?, byte(b)?]))
    }

    /// Create a color from a combined 24-bit integer `0xRRGGBB`
    pub fn from_int(i: u32) -> Result<Self> {
        if i > 0xFF_FFFF {
            return Err(ColorwizError::InvalidColor {
                value: format!("{:#X}", i),
                message: "value does not fit in 24 bits".to_string(),
            });
        }
        Ok(Self([(i >> 16) as u8, (i >> 8) as u8, i as u8]))
    }

    /// The combined 24-bit integer value
    pub fn to_int(self) -> u32 {
        let [r, g, b] = self.0;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }

    /// The `[r, g, b]` byte components
    pub fn to_rgb(self) -> [u8; 3] {
        self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
    }
}

impl FromStr for HexColor {
    type Err = ColorwizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let invalid = |message: &str| ColorwizError::InvalidColor {
            value: s.to_string(),
            message: message.to_string(),
        };

        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| invalid("expected a leading '#'"))?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid("expected exactly 6 hexadecimal digits"));
        }

        // Fixed-width substrings at offsets 1, 3 and 5 of the full text
        let channel = |offset: usize| {
            u8::from_str_radix(&digits[offset..offset + 2], 16)
                .map_err(|_| invalid("invalid hexadecimal digit"))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorwizError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}
