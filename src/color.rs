//! Color utilities for palette definitions
//!
//! Palette colors are flat RGB triples. Config files may spell them as:
//! - Hex: `#RGB`, `#RRGGBB`
//! - Functional: `rgb()`, `hsl()`, `hwb()`, `oklch()`
//! - Named: `red`, `purple`, etc.
//!
//! Alpha is not part of the grid model, so any alpha component is discarded.

use image::Rgb;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3 or 6 hex chars after #)
    #[error("invalid color length {0}, expected 3 or 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Parse a color string into an RGB triple.
///
/// # Examples
///
/// ```
/// use colorgrid::color::parse_color;
/// use image::Rgb;
///
/// assert_eq!(parse_color("#F00").unwrap(), Rgb([255, 0, 0]));
/// assert_eq!(parse_color("#876FCC").unwrap(), Rgb([135, 111, 204]));
/// assert_eq!(parse_color("rgb(69, 204, 245)").unwrap(), Rgb([69, 204, 245]));
/// assert_eq!(parse_color("black").unwrap(), Rgb([0, 0, 0]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgb<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Parse the digits of a hex color (without the leading `#`)
fn parse_hex_color(hex: &str) -> Result<Rgb<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let digits: Vec<u8> = hex.bytes().map(hex_value).collect();
    match digits.as_slice() {
        [r, g, b] => Ok(Rgb([r * 17, g * 17, b * 17])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgb([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2])),
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

/// Value of an ASCII hex digit; callers have already checked the byte.
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgb<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgb([rgba.red, rgba.green, rgba.blue])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => Ok(Rgb([
                unit_to_byte(rgb.r),
                unit_to_byte(rgb.g),
                unit_to_byte(rgb.b),
            ])),
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

fn unit_to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Format a color as `#RRGGBB`.
pub fn to_hex(rgb: Rgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

/// Format a color as a CSS functional string, e.g. `rgb(255, 0, 0)`.
pub fn to_css_rgb(rgb: Rgb<u8>) -> String {
    format!("rgb({}, {}, {})", rgb[0], rgb[1], rgb[2])
}

/// Relative luminance approximation (ITU-R BT.601 weights), 0-255.
pub fn luma(rgb: Rgb<u8>) -> u8 {
    let [r, g, b] = rgb.0;
    ((u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hex() {
        assert_eq!(parse_color("#0F0").unwrap(), Rgb([0, 255, 0]));
        assert_eq!(parse_color("#abc").unwrap(), Rgb([170, 187, 204]));
    }

    #[test]
    fn test_long_hex() {
        assert_eq!(parse_color("#FF9966").unwrap(), Rgb([255, 153, 102]));
        assert_eq!(parse_color("#b2f0e5").unwrap(), Rgb([178, 240, 229]));
    }

    #[test]
    fn test_hex_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("   "), Err(ColorError::Empty));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#FF00FF00"), Err(ColorError::InvalidLength(8)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
    }

    #[test]
    fn test_css_functional_and_named() {
        assert_eq!(parse_color("rgb(249, 231, 96)").unwrap(), Rgb([249, 231, 96]));
        assert_eq!(parse_color("white").unwrap(), Rgb([255, 255, 255]));
        assert_eq!(parse_color("hsl(0, 100%, 50%)").unwrap(), Rgb([255, 0, 0]));
    }

    #[test]
    fn test_css_garbage() {
        assert!(matches!(parse_color("not-a-color"), Err(ColorError::CssParse(_))));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(to_hex(Rgb([135, 111, 204])), "#876FCC");
        assert_eq!(to_css_rgb(Rgb([128, 128, 128])), "rgb(128, 128, 128)");
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(Rgb([0, 0, 0])), 0);
        assert_eq!(luma(Rgb([255, 255, 255])), 255);
        assert!(luma(Rgb([96, 96, 96])) < 128);
    }
}
