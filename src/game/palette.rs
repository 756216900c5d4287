//! Neon colors and the cycle that walks through them as the snake eats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color, written as `#rrggbb` or `#rrggbbaa`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Same color with a different alpha, the `color + "cc"` idiom of CSS hex colors
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    pub fn parse(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)?)),
            _ => None,
        }
    }

    /// Composite this color over an opaque background
    pub fn over(self, background: Rgba) -> Rgba {
        let alpha = self.a as u32;
        let mix = |fg: u8, bg: u8| ((fg as u32 * alpha + bg as u32 * (255 - alpha)) / 255) as u8;
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::parse(&value).ok_or_else(|| format!("invalid color {value:?}, expected #rrggbb[aa]"))
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}

/// The twelve neon colors the snake cycles through
pub fn neon_palette() -> Vec<Rgba> {
    vec![
        Rgba::rgb(0x00, 0xff, 0xff), // cyan
        Rgba::rgb(0xff, 0x00, 0xff), // magenta
        Rgba::rgb(0xff, 0xff, 0x00), // yellow
        Rgba::rgb(0x00, 0xff, 0x00), // green
        Rgba::rgb(0xff, 0x66, 0x00), // orange
        Rgba::rgb(0xff, 0x00, 0x66), // pink
        Rgba::rgb(0x66, 0x00, 0xff), // purple
        Rgba::rgb(0x00, 0xff, 0x66), // lime
        Rgba::rgb(0xff, 0x33, 0x66), // coral
        Rgba::rgb(0x33, 0xff, 0xcc), // turquoise
        Rgba::rgb(0xff, 0xcc, 0x00), // gold
        Rgba::rgb(0xcc, 0x00, 0xff), // violet
    ]
}

/// Index into a fixed palette, advanced once per consumption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorCycle {
    palette: Vec<Rgba>,
    index: usize,
    changes: u32,
}

impl ColorCycle {
    /// An empty palette falls back to the neon one so `current` always has a color
    pub fn new(palette: Vec<Rgba>) -> Self {
        let palette = if palette.is_empty() {
            neon_palette()
        } else {
            palette
        };
        Self {
            palette,
            index: 0,
            changes: 0,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of advances since the last reset
    pub fn changes(&self) -> u32 {
        self.changes
    }

    pub fn len(&self) -> usize {
        self.palette.len()
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty()
    }

    pub fn current(&self) -> Rgba {
        self.palette[self.index]
    }

    pub fn advance(&mut self) -> Rgba {
        self.index = (self.index + 1) % self.palette.len();
        self.changes += 1;
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.changes = 0;
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new(neon_palette())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgba::parse("#00ffff"), Some(Rgba::rgb(0, 255, 255)));
        assert_eq!(
            Rgba::parse("#ff666688"),
            Some(Rgba::rgb(0xff, 0x66, 0x66).with_alpha(0x88))
        );
        assert_eq!(Rgba::parse("00ffff"), None);
        assert_eq!(Rgba::parse("#0ff"), None);
        assert_eq!(Rgba::parse("#gg0000"), None);
        assert_eq!(Rgba::parse("#+f+f+f"), None);
        assert_eq!(Rgba::parse("#ff+f0000"), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let color = Rgba::rgb(0xcc, 0x00, 0xff).with_alpha(0x44);
        assert_eq!(color.to_string(), "#cc00ff44");
        assert_eq!(Rgba::parse(&color.to_string()), Some(color));
        assert_eq!(Rgba::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let json = serde_json::to_string(&Rgba::rgb(255, 0, 102)).unwrap();
        assert_eq!(json, "\"#ff0066\"");

        let parsed: Rgba = serde_json::from_str("\"#33ffcc\"").unwrap();
        assert_eq!(parsed, Rgba::rgb(0x33, 0xff, 0xcc));

        assert!(serde_json::from_str::<Rgba>("\"teal\"").is_err());
    }

    #[test]
    fn test_over_black() {
        assert_eq!(Rgba::WHITE.over(Rgba::BLACK), Rgba::WHITE);
        assert_eq!(Rgba::WHITE.with_alpha(0).over(Rgba::BLACK), Rgba::BLACK);
        assert_eq!(
            Rgba::rgb(255, 0, 0).with_alpha(0x80).over(Rgba::BLACK),
            Rgba::rgb(128, 0, 0)
        );
    }

    #[test]
    fn test_cycle_wraps() {
        let mut cycle = ColorCycle::default();
        assert_eq!(cycle.len(), 12);
        assert_eq!(cycle.current(), Rgba::rgb(0x00, 0xff, 0xff));

        for _ in 0..11 {
            cycle.advance();
        }
        assert_eq!(cycle.index(), 11);
        assert_eq!(cycle.advance(), Rgba::rgb(0x00, 0xff, 0xff));
        assert_eq!(cycle.index(), 0);
        assert_eq!(cycle.changes(), 12);

        cycle.reset();
        assert_eq!(cycle.index(), 0);
        assert_eq!(cycle.changes(), 0);
    }

    #[test]
    fn test_single_color_palette() {
        let mut cycle = ColorCycle::new(vec![Rgba::WHITE]);
        assert_eq!(cycle.advance(), Rgba::WHITE);
        assert_eq!(cycle.index(), 0);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        assert_eq!(ColorCycle::new(Vec::new()), ColorCycle::default());
    }
}
