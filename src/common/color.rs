use crate::error::ColorParseError;
use image::Rgb;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A 24-bit RGB color, displayed and serialized as a canonical `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color([u8; 3]);

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn r(&self) -> u8 {
        self.0[0]
    }

    pub fn g(&self) -> u8 {
        self.0[1]
    }

    pub fn b(&self) -> u8 {
        self.0[2]
    }

    pub fn channels(&self) -> [u8; 3] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }
        // from_str_radix tolerates a leading '+', so check the digits ourselves
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Rgb<u8>> for Color {
    fn from(px: Rgb<u8>) -> Self {
        Self(px.0)
    }
}

impl From<&Rgb<u8>> for Color {
    fn from(px: &Rgb<u8>) -> Self {
        Self(px.0)
    }
}

impl From<Color> for Rgb<u8> {
    fn from(color: Color) -> Self {
        Rgb(color.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_lowercase_zero_padded() {
        assert_eq!(Color::new(0x1a, 0x2b, 0x3c).to_string(), "#1a2b3c");
        assert_eq!(Color::new(0, 5, 255).to_string(), "#0005ff");
    }

    #[test]
    fn parses_and_canonicalizes() {
        let upper: Color = "#1A2B3C".parse().unwrap();
        let bare: Color = "1a2b3c".parse().unwrap();
        assert_eq!(upper, bare);
        assert_eq!(upper.to_hex(), "#1a2b3c");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(
            "#fff".parse::<Color>(),
            Err(ColorParseError::InvalidLength("#fff".to_string()))
        );
        assert_eq!(
            "#gg0000".parse::<Color>(),
            Err(ColorParseError::InvalidDigit("#gg0000".to_string()))
        );
        assert!("#+f0000".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn serde_uses_hex_strings() {
        let color = Color::new(0x33, 0x66, 0x99);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#336699\"");

        let back: Color = serde_json::from_str("\"#336699\"").unwrap();
        assert_eq!(back, color);
        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn converts_from_image_pixels() {
        let px = Rgb([10, 20, 30]);
        let color = Color::from(px);
        assert_eq!((color.r(), color.g(), color.b()), (10, 20, 30));
        assert_eq!(Rgb::from(color), px);
    }
}
