//! Wheel options and the segment color palette.

use serde::{Deserialize, Serialize};

/// Segment colors, cycled by insertion position.
pub const PALETTE: [&str; 16] = [
    "#374151", "#475569", "#334155", "#6366F1", "#2563EB", "#3B82F6", "#06B6D4", "#0891B2",
    "#0ea5a4", "#10B981", "#84CC16", "#F59E0B", "#F97316", "#EF4444", "#D946EF", "#8B5CF6",
];

/// Palette color for the option inserted at `position`.
pub fn color_for(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

/// A single entry on the wheel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WheelOption {
    /// The label shown on the segment. Never empty.
    pub text: String,
    /// Hex color (`#rrggbb`) of the segment.
    pub color: String,
}

impl WheelOption {
    /// Create an option with an explicit color.
    pub fn new(text: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: color.into(),
        }
    }

    /// Whether this option's text equals `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        self.text.to_lowercase() == text.to_lowercase()
    }

    /// Parse the color into RGB components. Returns `None` for anything that
    /// is not `#rrggbb`.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex(&self.color)
    }
}

/// Parse a `#rrggbb` color string.
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(color_for(0), "#374151");
        assert_eq!(color_for(15), "#8B5CF6");
        assert_eq!(color_for(16), "#374151");
        assert_eq!(color_for(49), color_for(1));
    }

    #[test]
    fn matches_ignores_case() {
        let opt = WheelOption::new("Pizza", color_for(0));
        assert!(opt.matches("pizza"));
        assert!(opt.matches("PIZZA"));
        assert!(!opt.matches("pasta"));
    }

    #[test]
    fn parse_palette_colors() {
        for color in PALETTE {
            assert!(parse_hex(color).is_some(), "{color} should parse");
        }
        assert_eq!(parse_hex("#0ea5a4"), Some((0x0e, 0xa5, 0xa4)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_hex("374151"), None);
        assert_eq!(parse_hex("#3741"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn serializes_like_browser_records() {
        let opt = WheelOption::new("A", "#374151");
        let json = serde_json::to_string(&opt).unwrap();
        assert_eq!(json, r##"{"text":"A","color":"#374151"}"##);
    }
}
