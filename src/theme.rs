//! Per-chat color themes.

use std::fmt;
use std::str::FromStr;

use image::Rgba;

use crate::error::{RenderError, Result};

/// Background of a freshly registered chat.
pub const DEFAULT_BACKGROUND: &str = "#212121";
/// Foreground of a freshly registered chat.
pub const DEFAULT_FOREGROUND: &str = "#fefefe";

/// Colors applied to one render call. Owned by the caller and never mutated
/// by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgba<u8>,
    pub foreground: Rgba<u8>,
    pub teacher_color: Rgba<u8>,
    pub time_color: Rgba<u8>,
}

impl Default for Theme {
    fn default() -> Self {
        let background = Rgba([0x21, 0x21, 0x21, 0xff]);
        let foreground = Rgba([0xfe, 0xfe, 0xfe, 0xff]);
        Theme {
            background,
            foreground,
            teacher_color: foreground,
            time_color: foreground,
        }
    }
}

impl Theme {
    /// Builds a theme from the four hex strings kept by the persistence layer.
    pub fn parse(background: &str, foreground: &str, teacher: &str, time: &str) -> Result<Self> {
        Ok(Theme {
            background: parse_hex_color(background)?,
            foreground: parse_hex_color(foreground)?,
            teacher_color: parse_hex_color(teacher)?,
            time_color: parse_hex_color(time)?,
        })
    }

    /// Two-color theme of the older chat records: teacher and time text
    /// share the foreground.
    pub fn two_tone(background: &str, foreground: &str) -> Result<Self> {
        Theme::parse(background, foreground, foreground, foreground)
    }

    pub fn set(&mut self, field: ThemeField, color: Rgba<u8>) {
        let slot = match field {
            ThemeField::Foreground => &mut self.foreground,
            ThemeField::Background => &mut self.background,
            ThemeField::TeacherColor => &mut self.teacher_color,
            ThemeField::TimeColor => &mut self.time_color,
        };
        *slot = color;
    }
}

/// Which theme color a chat command updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeField {
    Foreground,
    Background,
    TeacherColor,
    TimeColor,
}

impl FromStr for ThemeField {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('/').to_lowercase().as_str() {
            "fore" | "foreground" | "фронт" => Ok(ThemeField::Foreground),
            "back" | "background" | "бэк" | "бек" => Ok(ThemeField::Background),
            "teacher" | "teacher_color" | "препод" => Ok(ThemeField::TeacherColor),
            "time" | "time_color" | "время" => Ok(ThemeField::TimeColor),
            other => Err(RenderError::ColorError(format!("unknown theme field '{}'", other))),
        }
    }
}

impl fmt::Display for ThemeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ThemeField::Foreground => "foreground",
            ThemeField::Background => "background",
            ThemeField::TeacherColor => "teacher_color",
            ThemeField::TimeColor => "time_color",
        };
        f.write_str(name)
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
pub fn parse_hex_color(s: &str) -> Result<Rgba<u8>> {
    let hex = s.trim().trim_start_matches('#');
    if !(hex.len() == 6 || hex.len() == 8) || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(RenderError::ColorError(s.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| RenderError::ColorError(s.to_string()))
    };
    let alpha = if hex.len() == 8 { channel(6)? } else { 0xff };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, alpha]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgb_and_rgba() {
        assert_eq!(parse_hex_color("#212121").unwrap(), Rgba([0x21, 0x21, 0x21, 0xff]));
        assert_eq!(parse_hex_color("DD75DD80").unwrap(), Rgba([0xdd, 0x75, 0xdd, 0x80]));
    }

    #[test]
    fn rejects_malformed_colors() {
        assert!(parse_hex_color("#21212").is_err());
        assert!(parse_hex_color("#zzzzzz").is_err());
        assert!(parse_hex_color("").is_err());
    }

    #[test]
    fn default_matches_new_chat_colors() {
        let theme = Theme::two_tone(DEFAULT_BACKGROUND, DEFAULT_FOREGROUND).unwrap();
        assert_eq!(theme, Theme::default());
    }

    #[test]
    fn field_aliases_update_the_right_color() {
        let mut theme = Theme::default();
        let red = Rgba([0xff, 0, 0, 0xff]);
        theme.set("бэк".parse().unwrap(), red);
        assert_eq!(theme.background, red);
        assert_eq!(theme.foreground, Theme::default().foreground);

        theme.set("/time".parse().unwrap(), red);
        assert_eq!(theme.time_color, red);
        assert!("sideways".parse::<ThemeField>().is_err());
    }
}
