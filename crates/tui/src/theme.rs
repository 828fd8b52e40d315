use gamecal_core::config::ThemeConfig;
use ratatui::style::Color;
use tracing::warn;

/// Terminal palette, optionally overridden from the config file.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary_fg: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub muted: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            accent_alt: Color::Blue,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

impl Theme {
    /// Apply any valid hex overrides from the config on top of the default
    /// palette. Invalid values are logged and skipped.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let mut theme = Theme::default();
        apply(&mut theme.accent, &config.accent, "accent");
        apply(&mut theme.accent_alt, &config.accent_alt, "accent_alt");
        apply(&mut theme.muted, &config.muted, "muted");
        apply(&mut theme.selection_bg, &config.selection_bg, "selection_bg");
        apply(&mut theme.success, &config.success, "success");
        apply(&mut theme.warning, &config.warning, "warning");
        apply(&mut theme.danger, &config.danger, "danger");

        match &config.selection_fg {
            Some(_) => apply(&mut theme.selection_fg, &config.selection_fg, "selection_fg"),
            // Without an explicit foreground, pick one readable against the
            // (possibly overridden) selection background.
            None => theme.selection_fg = contrast_color(&theme.selection_bg, theme.selection_fg),
        }

        theme
    }
}

fn apply(slot: &mut Color, value: &Option<String>, key: &str) {
    if let Some(text) = value {
        match parse_hex_color(text) {
            Some(color) => *slot = color,
            None => warn!(key, value = %text, "Ignoring invalid theme color"),
        }
    }
}

fn parse_hex_color(input: &str) -> Option<Color> {
    let trimmed = input.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let hex = hex.strip_prefix("0x").unwrap_or(hex);
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        _ => None,
    }
}

fn contrast_color(color: &Color, fallback: Color) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let luminance = 0.299 * f64::from(*r) + 0.587 * f64::from(*g) + 0.114 * f64::from(*b);
            if luminance > 186.0 {
                Color::Black
            } else {
                Color::White
            }
        }
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(parse_hex_color("#22d3ee"), Some(Color::Rgb(0x22, 0xd3, 0xee)));
        assert_eq!(parse_hex_color("0xff0000"), Some(Color::Rgb(255, 0, 0)));
        assert_eq!(parse_hex_color("#fff"), Some(Color::Rgb(255, 255, 255)));
        assert_eq!(parse_hex_color("not-a-color"), None);
    }

    #[test]
    fn invalid_overrides_keep_the_default() {
        let config = ThemeConfig {
            accent: Some("nope".to_string()),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.accent, Theme::default().accent);
    }

    #[test]
    fn light_selection_background_gets_dark_foreground() {
        let config = ThemeConfig {
            selection_bg: Some("#ffffff".to_string()),
            ..ThemeConfig::default()
        };
        let theme = Theme::from_config(&config);
        assert_eq!(theme.selection_fg, Color::Black);
    }
}
