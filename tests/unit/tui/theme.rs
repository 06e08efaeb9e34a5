use super::*;
use crate::settings::ThemeSettings;

#[test]
fn parse_color_reads_hex_and_names() {
    assert_eq!(parse_color("#102030"), Some(Color::Rgb(16, 32, 48)));
    assert_eq!(parse_color(" Cyan "), Some(Color::Indexed(6)));
    assert_eq!(parse_color("dark_grey"), Some(Color::Indexed(8)));
    assert_eq!(parse_color("reset"), Some(Color::Reset));
}

#[test]
fn parse_color_rejects_garbage() {
    assert_eq!(parse_color(""), None);
    assert_eq!(parse_color("#12345"), None);
    assert_eq!(parse_color("#zzzzzz"), None);
    assert_eq!(parse_color("chartreuse"), None);
}

#[test]
fn theme_uses_settings_and_falls_back_per_field() {
    let settings = ThemeSettings {
        header_fg: Some("#ff8800".to_string()),
        selected_bg: Some("not a colour".to_string()),
        selected_fg: None,
        cursor_fg: None,
        rule_bg: None,
        accent_fg: None,
    };

    let theme = UiTheme::from_settings(&settings);
    assert_eq!(theme.header_fg, Color::Rgb(255, 136, 0));
    assert_eq!(theme.selected_bg, UiTheme::default().selected_bg);
    assert_eq!(theme.cursor_fg, Color::Indexed(3));
}
