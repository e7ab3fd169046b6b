//! CSS colour parsing and serialisation.
//!
//! Used by [`RecordingBackend`](crate::RecordingBackend) to store paint
//! styles the way a browser context reports them back: opaque colours as
//! lower-case `#rrggbb`, translucent ones as `rgba(r, g, b, a)`.

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

const NAMED: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("red", Color::rgb(255, 0, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
    ("silver", Color::rgb(192, 192, 192)),
    ("maroon", Color::rgb(128, 0, 0)),
    ("navy", Color::rgb(0, 0, 128)),
    ("olive", Color::rgb(128, 128, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
    ("orange", Color::rgb(255, 165, 0)),
    ("transparent", Color::rgba(0, 0, 0, 0)),
];

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let bytes = hex.strip_prefix('#')?.as_bytes();

        match bytes.len() {
            3 | 4 => {
                let mut ch = [255u8; 4];
                for (slot, &b) in ch.iter_mut().zip(bytes) {
                    *slot = hex_val(b)? * 17;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            6 | 8 => {
                let mut ch = [255u8; 4];
                for (slot, pair) in ch.iter_mut().zip(bytes.chunks_exact(2)) {
                    *slot = hex_val(pair[0])? << 4 | hex_val(pair[1])?;
                }
                Some(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => None,
        }
    }

    /// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)` with integer channels and
    /// a fractional alpha.
    fn from_functional(s: &str) -> Option<Self> {
        let (args, has_alpha) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else {
            (s.strip_prefix("rgb(")?.strip_suffix(')')?, false)
        };
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != if has_alpha { 4 } else { 3 } {
            return None;
        }
        let channel = |p: &str| -> Option<u8> {
            let v: f64 = p.parse().ok()?;
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        let a = if has_alpha {
            let v: f64 = parts[3].parse().ok()?;
            (v.clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            255
        };
        Some(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            a,
        ))
    }

    /// Parse the subset of CSS colour syntax the recording backend accepts.
    pub fn parse_css(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            return Self::from_hex(s);
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return Self::from_functional(&lower);
        }
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, c)| *c)
    }

    /// Serialise the way a 2D context reports its paint style.
    pub fn to_css(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha_str(self.a))
        }
    }
}

/// Shortest decimal alpha that maps back to the same byte.
fn alpha_str(a: u8) -> String {
    let exact = a as f64 / 255.0;
    for digits in 1..=3 {
        let scale = 10f64.powi(digits);
        let rounded = (exact * scale).round() / scale;
        if (rounded * 255.0).round() as u8 == a {
            return rounded.to_string();
        }
    }
    exact.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_forms_normalise_to_lowercase_six_digits() {
        assert_eq!(Color::parse_css("#123456").unwrap().to_css(), "#123456");
        assert_eq!(Color::parse_css("#ABCDEF").unwrap().to_css(), "#abcdef");
        assert_eq!(Color::parse_css("#fff").unwrap().to_css(), "#ffffff");
    }

    #[test]
    fn translucent_colours_use_rgba() {
        assert_eq!(Color::parse_css("#ff000080").unwrap().to_css(), "rgba(255, 0, 0, 0.5)");
        assert_eq!(
            Color::parse_css("rgba(10, 20, 30, 0.25)").unwrap().to_css(),
            "rgba(10, 20, 30, 0.25)"
        );
        assert_eq!(Color::parse_css("transparent").unwrap().to_css(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn named_and_functional_colours() {
        assert_eq!(Color::parse_css("White").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::parse_css("rgb(1, 2, 3)").unwrap().to_css(), "#010203");
    }

    #[test]
    fn garbage_is_rejected() {
        for bad in ["", "#12", "#ggg", "notacolor", "rgb(1, 2)", "rgba(1,2,3)"] {
            assert_eq!(Color::parse_css(bad), None, "{bad}");
        }
    }
}
