use bevy::prelude::*;

use crate::protocol::Player;

/// Board colours, as CSS-like strings (`red`, `#fc0`, `rgb(30, 60, 200)`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub board: String,
    pub empty_cell: String,
    pub player_one: String,
    pub player_two: String,
    pub text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            board: "#1f4fc4".to_string(),
            empty_cell: "white".to_string(),
            player_one: "red".to_string(),
            player_two: "yellow".to_string(),
            text: "white".to_string(),
        }
    }
}

/// `Theme` with every colour parsed. Unparseable entries fall back to the default theme.
#[derive(Resource, Clone, Debug)]
pub struct Palette {
    pub board: Color,
    pub empty_cell: Color,
    pub player_one: Color,
    pub player_two: Color,
    pub text: Color,
}

impl Palette {
    pub fn from_theme(theme: &Theme) -> Self {
        let fallback = Theme::default();
        let pick = |value: &str, default: &str| {
            parse_color(value)
                .or_else(|| parse_color(default))
                .unwrap_or(Color::WHITE)
        };

        Self {
            board: pick(&theme.board, &fallback.board),
            empty_cell: pick(&theme.empty_cell, &fallback.empty_cell),
            player_one: pick(&theme.player_one, &fallback.player_one),
            player_two: pick(&theme.player_two, &fallback.player_two),
            text: pick(&theme.text, &fallback.text),
        }
    }

    pub fn cell(&self, occupant: Option<Player>) -> Color {
        match occupant {
            None => self.empty_cell,
            Some(Player::One) => self.player_one,
            Some(Player::Two) => self.player_two,
        }
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim().to_lowercase();

    // Named colors
    match value.as_str() {
        "transparent" => return Some(Color::NONE),
        "black" => return Some(Color::BLACK),
        "white" => return Some(Color::WHITE),
        "red" => return Some(Color::srgb(1.0, 0.0, 0.0)),
        "green" => return Some(Color::srgb(0.0, 1.0, 0.0)),
        "blue" => return Some(Color::srgb(0.0, 0.0, 1.0)),
        "yellow" => return Some(Color::srgb(1.0, 1.0, 0.0)),
        "orange" => return Some(Color::srgb(1.0, 0.65, 0.0)),
        "gray" | "grey" => return Some(Color::srgb(0.5, 0.5, 0.5)),
        _ => {}
    }

    // Hex color: #RGB, #RRGGBB
    if let Some(hex) = value.strip_prefix("#") {
        return parse_hex_color(hex);
    }

    // rgb(r, g, b) or rgba(r, g, b, a)
    if value.starts_with("rgb") {
        return parse_rgb_color(&value);
    }

    log::warn!("Unknown color format: '{}'", value);
    None
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim();
    if !hex.is_ascii() {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    let (r, g, b) = match hex.len() {
        3 => (
            channel(&hex[0..1].repeat(2))?,
            channel(&hex[1..2].repeat(2))?,
            channel(&hex[2..3].repeat(2))?,
        ),
        6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
        _ => return None,
    };

    Some(Color::srgb_u8(r, g, b))
}

fn parse_rgb_color(value: &str) -> Option<Color> {
    let inner = value
        .trim_start_matches("rgba(")
        .trim_start_matches("rgb(")
        .trim_end_matches(")");

    let parts: Vec<&str> = inner.split(',').map(|s| s.trim()).collect();

    let r: f32 = parts.first()?.parse().ok()?;
    let g: f32 = parts.get(1)?.parse().ok()?;
    let b: f32 = parts.get(2)?.parse().ok()?;
    let a: f32 = parts.get(3).and_then(|s| s.parse().ok()).unwrap_or(1.0);

    // 0-255 unless every channel already fits 0-1
    let (r, g, b) = if r > 1.0 || g > 1.0 || b > 1.0 {
        (r / 255.0, g / 255.0, b / 255.0)
    } else {
        (r, g, b)
    };

    Some(Color::srgba(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color(" Red "), Some(Color::srgb(1.0, 0.0, 0.0)));
        assert_eq!(parse_color("yellow"), Some(Color::srgb(1.0, 1.0, 0.0)));
        assert_eq!(parse_color("chartreuse"), None);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#fff"), Some(Color::srgb_u8(255, 255, 255)));
        assert_eq!(parse_color("#1f4fc4"), Some(Color::srgb_u8(0x1f, 0x4f, 0xc4)));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#zzz"), None);
    }

    #[test]
    fn test_rgb_colors() {
        assert_eq!(
            parse_color("rgb(255, 0, 0)"),
            Some(Color::srgba(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(
            parse_color("rgba(0, 0, 1, 0.5)"),
            Some(Color::srgba(0.0, 0.0, 1.0, 0.5))
        );
        assert_eq!(parse_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_palette_falls_back_per_entry() {
        let theme = Theme {
            player_one: "not-a-colour".to_string(),
            player_two: "#00f".to_string(),
            ..Theme::default()
        };
        let palette = Palette::from_theme(&theme);

        assert_eq!(palette.player_one, Color::srgb(1.0, 0.0, 0.0));
        assert_eq!(palette.player_two, Color::srgb_u8(0, 0, 255));
        assert_eq!(palette.cell(None), Color::WHITE);
        assert_eq!(palette.cell(Some(Player::Two)), palette.player_two);
    }
}
