use ratatui::style::Color;

/// Parse a color string into a ratatui Color
/// Supports hex format (#RRGGBB or #RGB) plus a handful of named colors.
/// Returns Color::White as default for unrecognized colors
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        _ => {
            if s.starts_with('#')
                && let Some(color) = parse_hex_color(&s)
            {
                return color;
            }
            Color::White
        }
    }
}

/// Parse hex color format (#RRGGBB or #RGB)
fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');

    if hex.len() == 6 {
        if let (Ok(r), Ok(g), Ok(b)) = (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            return Some(Color::Rgb(r, g, b));
        }
        None
    } else if hex.len() == 3 {
        let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
        let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
        let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
        // Expand: 0x0 -> 0x00, 0xF -> 0xFF
        Some(Color::Rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
    } else {
        None
    }
}

/// Pick black or white text for readability on the given background,
/// using the relative luminance of the color.
pub fn get_contrast_text_color(bg: Color) -> Color {
    let (r, g, b) = match bg {
        Color::Rgb(r, g, b) => (r as f32, g as f32, b as f32),
        Color::Black | Color::DarkGray | Color::Red | Color::Blue | Color::Magenta => {
            return Color::White;
        }
        _ => return Color::Black,
    };
    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    if luminance > 0.5 { Color::Black } else { Color::White }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#7C3AED"), Color::Rgb(0x7C, 0x3A, 0xED));
        assert_eq!(parse_color("#fff"), Color::Rgb(255, 255, 255));
        assert_eq!(parse_color("#zzz"), Color::White);
        assert_eq!(parse_color("red"), Color::Red);
    }

    #[test]
    fn contrast_color_follows_luminance() {
        assert_eq!(get_contrast_text_color(Color::Rgb(255, 255, 255)), Color::Black);
        assert_eq!(get_contrast_text_color(Color::Rgb(15, 23, 42)), Color::White);
        assert_eq!(get_contrast_text_color(Color::Black), Color::White);
    }
}
