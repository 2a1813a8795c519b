//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use crate::Palette;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Number of block colours; a block uses `value % BLOCK_COLOURS`.
pub const BLOCK_COLOURS: usize = 5;

/// One Dark palette and UI colours loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Block fills: green, yellow, red, blue, magenta.
    pub blocks: [Color; BLOCK_COLOURS],
    /// Board background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, target).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (rules, hints).
    pub inactive_fg: Color,
    /// Top danger row and low-time warnings.
    pub danger: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

const ONEDARK_BLOCKS: [Color; BLOCK_COLOURS] = [
    Color::Rgb(0x98, 0xC3, 0x79), // mem_box / green
    Color::Rgb(0xE5, 0xC0, 0x7B), // title / yellow
    Color::Rgb(0xE0, 0x6C, 0x75), // cpu_end / red
    Color::Rgb(0x61, 0xAF, 0xEF), // cpu_box / blue
    Color::Rgb(0xC6, 0x78, 0xDD), // net_box / magenta
];

impl Default for Theme {
    fn default() -> Self {
        Self::onedark_default()
    }
}

impl Theme {
    /// Hardcoded One Dark defaults (hex values from onedark.theme).
    pub fn onedark_default() -> Self {
        Self {
            blocks: ONEDARK_BLOCKS,
            bg: Color::Rgb(0x31, 0x35, 0x3F),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            inactive_fg: Color::Rgb(0x5C, 0x63, 0x70),
            danger: Color::Rgb(0xE0, 0x6C, 0x75),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to One Dark defaults if path is None or the file is missing.
    pub fn load(path: Option<&Path>, palette: Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: Palette) -> Self {
        let mut t = Self::onedark_default();
        t.apply_palette(palette);
        t
    }

    /// Override block colours for high-contrast or colorblind.
    pub fn apply_palette(&mut self, palette: Palette) {
        match palette {
            Palette::Normal => {}
            Palette::HighContrast => {
                self.blocks = [
                    Color::Rgb(0x00, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0xFF, 0x00),
                    Color::Rgb(0xFF, 0x00, 0x00),
                    Color::Rgb(0x00, 0x88, 0xFF),
                    Color::Rgb(0xFF, 0x00, 0xFF),
                ];
            }
            Palette::Colorblind => {
                // Okabe-Ito style: no red/green pair carries meaning alone.
                self.blocks = [
                    Color::Rgb(0x00, 0x77, 0xBB),
                    Color::Rgb(0xEE, 0x77, 0x33),
                    Color::Rgb(0x00, 0x99, 0x88),
                    Color::Rgb(0xEE, 0x33, 0x77),
                    Color::Rgb(0xBB, 0xBB, 0x00),
                ];
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| map.get(key).and_then(|v| parse_hex(v).ok());
        let d = Self::onedark_default();
        Self {
            blocks: [
                get("mem_box").or_else(|| get("cpu_start")).unwrap_or(d.blocks[0]),
                get("cpu_mid").or_else(|| get("title")).unwrap_or(d.blocks[1]),
                get("cpu_end").or_else(|| get("temp_end")).unwrap_or(d.blocks[2]),
                get("cpu_box").unwrap_or(d.blocks[3]),
                get("net_box").unwrap_or(d.blocks[4]),
            ],
            bg: get("meter_bg").unwrap_or(d.bg),
            div_line: get("div_line").unwrap_or(d.div_line),
            main_fg: get("main_fg").unwrap_or(d.main_fg),
            title: get("title").unwrap_or(d.title),
            inactive_fg: get("inactive_fg").unwrap_or(d.inactive_fg),
            danger: get("temp_end").or_else(|| get("cpu_end")).unwrap_or(d.danger),
        }
    }

    /// Fill colour for a block value.
    #[inline]
    pub fn block_color(&self, value: u8) -> Color {
        self.blocks[(value as usize) % BLOCK_COLOURS]
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some(stripped) = line.strip_prefix("theme[") else {
            continue;
        };
        let Some(end) = stripped.find(']') else {
            continue;
        };
        let key = stripped[..end].trim();
        let rest = stripped[end + 1..].trim();
        if let Some(value) = rest.strip_prefix('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if !value.is_empty() {
                map.insert(key.to_string(), value.to_string());
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    let invalid = || ThemeError::InvalidHex(s.to_string());
    if !s.is_ascii() {
        return Err(invalid());
    }
    let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| invalid());
    let (r, g, b) = match s.len() {
        6 => (channel(&s[0..2])?, channel(&s[2..4])?, channel(&s[4..6])?),
        3 => (
            channel(&s[0..1])? * 17,
            channel(&s[1..2])? * 17,
            channel(&s[2..3])? * 17,
        ),
        _ => return Err(invalid()),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#98C379").unwrap();
        assert!(matches!(c, Color::Rgb(0x98, 0xC3, 0x79)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(matches!(parse_hex("#12"), Err(ThemeError::InvalidHex(_))));
        assert!(matches!(parse_hex("#GGGGGG"), Err(ThemeError::InvalidHex(_))));
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(
            r##"
# comment
theme[meter_bg]="#31353F"
theme[title]='#FFFFFF'
not a theme line
"##,
        );
        assert_eq!(map.get("meter_bg"), Some(&"#31353F".to_string()));
        assert_eq!(map.get("title"), Some(&"#FFFFFF".to_string()));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_theme_file_overrides_defaults() {
        let map = parse_theme_file(r##"theme[net_box]="#010203""##);
        let theme = Theme::from_map(&map);
        assert!(matches!(theme.blocks[4], Color::Rgb(1, 2, 3)));
        assert_eq!(theme.bg, Theme::onedark_default().bg);
    }

    #[test]
    fn test_block_color_wraps_by_value() {
        let theme = Theme::default();
        assert_eq!(theme.block_color(1), theme.blocks[1]);
        assert_eq!(theme.block_color(5), theme.blocks[0]);
        assert_eq!(theme.block_color(9), theme.blocks[4]);
    }

    #[test]
    fn test_missing_file_uses_palette() {
        let theme = Theme::load(Some(Path::new("/nonexistent/x.theme")), Palette::HighContrast)
            .unwrap();
        assert!(matches!(theme.blocks[0], Color::Rgb(0, 255, 0)));
    }
}
