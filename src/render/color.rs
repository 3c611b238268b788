//! Colours for the sky renderer.
//!
//! Theme colours are configured as CSS hex strings (`#RGB`, `#RGBA`,
//! `#RRGGBB`, `#RRGGBBAA`).

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0, a: 255 };
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Linear blend: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let ch = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: ch(self.a, other.a),
        }
    }

    /// Same colour with alpha scaled by `opacity` in [0, 1].
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: (self.a as f64 * opacity.clamp(0.0, 1.0)).round() as u8,
            ..self
        }
    }
}

/// One hex digit, either case.
#[inline]
fn nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Parse a CSS hex colour. `None` for anything malformed.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let digits = s.trim().strip_prefix('#')?;
    let n = digits.bytes().map(nibble).collect::<Option<Vec<u8>>>()?;
    // #RGB widens each digit to a byte: 0xF → 0xFF
    let short = |i: usize| n[i] * 0x11;
    let long = |i: usize| n[i] << 4 | n[i + 1];

    match n.len() {
        3 => Some(Rgba { r: short(0), g: short(1), b: short(2), a: 255 }),
        4 => Some(Rgba { r: short(0), g: short(1), b: short(2), a: short(3) }),
        6 => Some(Rgba { r: long(0), g: long(2), b: long(4), a: 255 }),
        8 => Some(Rgba { r: long(0), g: long(2), b: long(4), a: long(6) }),
        _ => None,
    }
}
