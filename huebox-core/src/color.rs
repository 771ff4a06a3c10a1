use std::{
    fmt,
    str::FromStr,
};

use palette::{
    Srgb,
    Srgba,
};
use serde::{
    Deserialize,
    Serialize,
};

pub const MAX_ALPHA_PERCENT: u8 = 100;

/// An sRGB color with 8 bit channels and an alpha between 0 and 1.
///
/// Alpha is stored in hundredths. That is the precision of the `rgba(...)`
/// text form, so a color written out and parsed back compares equal to the
/// original.
///
/// Serializes as its `rgba(r, g, b, a)` text form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    alpha_percent: u8,
}

impl Color {
    pub const fn opaque(red: u8, green: u8, blue: u8) -> Self {
        Self::from_percent(red, green, blue, MAX_ALPHA_PERCENT)
    }

    /// Alpha is clamped to `[0, 1]` and rounded to two decimals.
    pub fn new(red: u8, green: u8, blue: u8, alpha: f32) -> Self {
        Self::from_percent(red, green, blue, alpha_to_percent(alpha))
    }

    /// Takes alpha the way the alpha slider reports it, `0..=100`.
    pub const fn from_percent(red: u8, green: u8, blue: u8, alpha_percent: u8) -> Self {
        let alpha_percent = if alpha_percent > MAX_ALPHA_PERCENT {
            MAX_ALPHA_PERCENT
        }
        else {
            alpha_percent
        };

        Self {
            red,
            green,
            blue,
            alpha_percent,
        }
    }

    pub fn alpha(&self) -> f32 {
        f32::from(self.alpha_percent) / f32::from(MAX_ALPHA_PERCENT)
    }

    pub fn alpha_percent(&self) -> u8 {
        self.alpha_percent
    }

    #[must_use]
    pub fn with_alpha_percent(self, alpha_percent: u8) -> Self {
        Self::from_percent(self.red, self.green, self.blue, alpha_percent)
    }

    pub fn rgb(&self) -> Srgb<u8> {
        Srgb::new(self.red, self.green, self.blue)
    }

    /// Converts to 8 bit RGBA, with alpha scaled to `0..=255`.
    pub fn to_srgba(&self) -> Srgba<u8> {
        let alpha = (u16::from(self.alpha_percent) * 255 + 50) / u16::from(MAX_ALPHA_PERCENT);
        Srgba::new(self.red, self.green, self.blue, alpha as u8)
    }

    /// `#rrggbb` in lowercase. Alpha is not included.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Alpha with exactly two decimals, e.g. `0.50`.
    pub fn alpha_text(&self) -> String {
        format!(
            "{}.{:02}",
            self.alpha_percent / MAX_ALPHA_PERCENT,
            self.alpha_percent % MAX_ALPHA_PERCENT
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::opaque(0, 0, 0)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(value: Srgb<u8>) -> Self {
        Self::opaque(value.red, value.green, value.blue)
    }
}

impl From<Color> for Srgba<u8> {
    fn from(value: Color) -> Self {
        value.to_srgba()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.red,
            self.green,
            self.blue,
            self.alpha_text()
        )
    }
}

/// Parses colors permissively.
///
/// Strings starting with `#` are hex (`#rgb`, `#rrggbb` or `#rrggbbaa`).
/// Anything else is scanned for runs of digits and dots: the first three are
/// red, green and blue, an optional fourth is alpha (defaulting to 1), and
/// the rest is ignored. So `rgba(1, 2, 3, 0.5)`, `rgb(1,2,3)` and `1 2 3`
/// are all accepted. Channels are rounded and clamped to `0..=255`.
impl FromStr for Color {
    type Err = InvalidColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || {
            InvalidColor {
                value: s.to_owned(),
            }
        };

        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(err);
        }

        let mut numbers = trimmed
            .split(|c: char| !(c.is_ascii_digit() || c == '.'))
            .filter(|run| !run.is_empty())
            .map(|run| run.parse::<f32>().map_err(|_| err()));

        let mut channel = || -> Result<u8, InvalidColor> {
            let value = numbers.next().ok_or_else(err)??;
            Ok(value.round().clamp(0.0, 255.0) as u8)
        };
        let red = channel()?;
        let green = channel()?;
        let blue = channel()?;

        let alpha = numbers.next().transpose()?.unwrap_or(1.0);

        Ok(Self::new(red, green, blue, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = InvalidColor;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("Invalid color: {value}")]
pub struct InvalidColor {
    pub value: String,
}

fn alpha_to_percent(alpha: f32) -> u8 {
    // note: NaN saturates to 0 in the cast
    (alpha.clamp(0.0, 1.0) * f32::from(MAX_ALPHA_PERCENT)).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
            Some(Color::opaque(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Some(Color::opaque(byte(0)?, byte(2)?, byte(4)?)),
        8 => {
            let alpha = f32::from(byte(6)?) / 255.0;
            Some(Color::new(byte(0)?, byte(2)?, byte(4)?, alpha))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Color;

    #[test]
    fn it_formats_rgba_with_two_decimals() {
        assert_eq!(Color::opaque(255, 0, 0).to_string(), "rgba(255, 0, 0, 1.00)");
        assert_eq!(
            Color::from_percent(12, 34, 56, 5).to_string(),
            "rgba(12, 34, 56, 0.05)"
        );
        assert_eq!(
            Color::from_percent(1, 2, 3, 0).to_string(),
            "rgba(1, 2, 3, 0.00)"
        );
    }

    #[test]
    fn it_formats_hex_without_alpha() {
        assert_eq!(Color::from_percent(255, 10, 0, 30).to_hex(), "#ff0a00");
        assert_eq!(Color::opaque(0, 0, 0).to_hex(), "#000000");
    }

    #[test]
    fn it_rounds_alpha_to_hundredths() {
        let color = Color::new(1, 2, 3, 0.333);
        assert_eq!(color.alpha_percent(), 33);
        assert_eq!(color, "rgba(1, 2, 3, 0.33)".parse().unwrap());

        assert_eq!(Color::new(1, 2, 3, 7.0).alpha_percent(), 100);
        assert_eq!(Color::new(1, 2, 3, -1.0).alpha_percent(), 0);
        assert_eq!(Color::from_percent(1, 2, 3, 250).alpha_percent(), 100);
    }

    #[test]
    fn it_parses_its_own_output() {
        let color = Color::from_percent(200, 100, 50, 42);
        assert_eq!(color.to_string().parse::<Color>().unwrap(), color);
    }

    #[test]
    fn it_defaults_missing_alpha_to_opaque() {
        let color: Color = "rgb(10, 20, 30)".parse().unwrap();
        assert_eq!(color, Color::opaque(10, 20, 30));
    }

    #[test]
    fn it_parses_permissively() {
        assert_eq!(
            "  1 2 3 0.5 ".parse::<Color>().unwrap(),
            Color::from_percent(1, 2, 3, 50)
        );
        assert_eq!(
            "rgba(300, 12.6, 0, 2)".parse::<Color>().unwrap(),
            Color::opaque(255, 13, 0)
        );
    }

    #[test]
    fn it_parses_hex() {
        assert_eq!("#ff8000".parse::<Color>().unwrap(), Color::opaque(255, 128, 0));
        assert_eq!("#F0A".parse::<Color>().unwrap(), Color::opaque(255, 0, 170));
        assert_eq!(
            "#00000080".parse::<Color>().unwrap(),
            Color::from_percent(0, 0, 0, 50)
        );
    }

    #[test]
    fn it_rejects_garbage() {
        assert!("".parse::<Color>().is_err());
        assert!("rgba(1, 2)".parse::<Color>().is_err());
        assert!("rgba(1..2, 3, 4)".parse::<Color>().is_err());
        assert!("#12345".parse::<Color>().is_err());
        assert!("#ggg".parse::<Color>().is_err());
        assert!("#ééé".parse::<Color>().is_err());
    }

    #[test]
    fn it_scales_alpha_to_a_byte() {
        assert_eq!(Color::from_percent(0, 0, 0, 100).to_srgba().alpha, 255);
        assert_eq!(Color::from_percent(0, 0, 0, 50).to_srgba().alpha, 128);
        assert_eq!(Color::from_percent(0, 0, 0, 0).to_srgba().alpha, 0);
    }

    #[test]
    fn it_serializes_as_rgba_strings() {
        let colors = vec![Color::opaque(255, 0, 0), Color::from_percent(0, 0, 255, 25)];
        let json = serde_json::to_string(&colors).unwrap();
        assert_eq!(json, r#"["rgba(255, 0, 0, 1.00)","rgba(0, 0, 255, 0.25)"]"#);

        let parsed: Vec<Color> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, colors);
    }
}
