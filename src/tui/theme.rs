//! Colours of the list dialog, resolved once from the settings file.

use ratatui::style::Color;

use crate::settings::ThemeSettings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiTheme {
    pub header_fg: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub cursor_fg: Color,
    pub rule_bg: Color,
    pub accent_fg: Color,
    pub muted_fg: Color,
    pub error_fg: Color,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::from_settings(&ThemeSettings::default())
    }
}

impl UiTheme {
    pub fn from_settings(settings: &ThemeSettings) -> Self {
        let pick = |value: &Option<String>, fallback: Color| {
            value.as_deref().and_then(parse_color).unwrap_or(fallback)
        };

        Self {
            header_fg: pick(&settings.header_fg, Color::Indexed(6)),
            selected_bg: pick(&settings.selected_bg, Color::Indexed(8)),
            selected_fg: pick(&settings.selected_fg, Color::Indexed(15)),
            cursor_fg: pick(&settings.cursor_fg, Color::Indexed(3)),
            rule_bg: pick(&settings.rule_bg, Color::Indexed(0)),
            accent_fg: pick(&settings.accent_fg, Color::Indexed(3)),
            muted_fg: Color::Indexed(8),
            error_fg: Color::Indexed(1),
        }
    }
}

pub fn parse_color(value: &str) -> Option<Color> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }

    if let Some(hex) = v.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb(r, g, b));
        }
        return None;
    }

    let v = v.to_ascii_lowercase();
    let c = match v.as_str() {
        "reset" => Color::Reset,
        "black" => Color::Indexed(0),
        "red" => Color::Indexed(1),
        "green" => Color::Indexed(2),
        "yellow" => Color::Indexed(3),
        "blue" => Color::Indexed(4),
        "magenta" => Color::Indexed(5),
        "cyan" => Color::Indexed(6),
        "gray" | "grey" => Color::Indexed(7),
        "dark_gray" | "darkgrey" | "dark_grey" => Color::Indexed(8),
        "white" => Color::Indexed(15),
        "light_red" => Color::Indexed(9),
        "light_green" => Color::Indexed(10),
        "light_yellow" => Color::Indexed(11),
        "light_blue" => Color::Indexed(12),
        "light_magenta" => Color::Indexed(13),
        "light_cyan" => Color::Indexed(14),
        _ => return None,
    };

    Some(c)
}

#[cfg(test)]
#[path = "../../tests/unit/tui/theme.rs"]
mod tests;
