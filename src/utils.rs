use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

/// Profile mode for the application (dev or prod)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Dev,
    Prod,
}

/// Get the configuration directory path for shelfmark
/// If profile is Dev, uses "shelfmark-dev" instead of "shelfmark"
pub fn get_config_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "shelfmark-dev",
        Profile::Prod => "shelfmark",
    };
    ProjectDirs::from("com", "shelfmark", app_name).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the data directory path for shelfmark
/// If profile is Dev, uses "shelfmark-dev" instead of "shelfmark"
pub fn get_data_dir(profile: Profile) -> Option<PathBuf> {
    let app_name = match profile {
        Profile::Dev => "shelfmark-dev",
        Profile::Prod => "shelfmark",
    };
    ProjectDirs::from("com", "shelfmark", app_name).map(|dirs| dirs.data_dir().to_path_buf())
}

/// Expand `~` in a path string to the user's home directory
pub fn expand_path(path: &str) -> PathBuf {
    if path.starts_with("~/") {
        if let Some(home) = BaseDirs::new().map(|d| d.home_dir().to_path_buf()) {
            return home.join(&path[2..]);
        }
    }
    PathBuf::from(path)
}

/// Millisecond timestamp used as the id of newly stored records.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current instant as an RFC 3339 string, the format of `completedDate` and
/// annotation dates.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Calendar date a stored RFC 3339 timestamp falls on, or None when the
/// string does not parse.
pub fn parse_stored_date(value: &str) -> Option<chrono::NaiveDate> {
    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Format a stored RFC 3339 timestamp for display (YYYY-MM-DD), falling back
/// to the raw string when it does not parse.
pub fn display_date(value: &str) -> String {
    match parse_stored_date(value) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => value.to_string(),
    }
}

/// Parsed key binding information
#[derive(Debug, Clone)]
pub struct ParsedKeyBinding {
    pub key_code: crossterm::event::KeyCode,
    pub requires_ctrl: bool,
}

/// Parse a key binding string from config into a ParsedKeyBinding
/// Supports: single keys ("q", "a"), special keys ("Enter", "Left", "Tab"),
/// and modifiers ("Ctrl+e")
pub fn parse_key_binding(key_str: &str) -> Result<ParsedKeyBinding, String> {
    let key_str = key_str.trim();

    if let Some(key_part) = key_str.strip_prefix("Ctrl+") {
        let key_code = parse_key_code(key_part)?;
        return Ok(ParsedKeyBinding {
            key_code,
            requires_ctrl: true,
        });
    }

    let key_code = parse_key_code(key_str)?;
    Ok(ParsedKeyBinding {
        key_code,
        requires_ctrl: false,
    })
}

fn parse_key_code(key_str: &str) -> Result<crossterm::event::KeyCode, String> {
    use crossterm::event::KeyCode;
    match key_str {
        "Enter" => Ok(KeyCode::Enter),
        "Esc" | "Escape" => Ok(KeyCode::Esc),
        "Backspace" => Ok(KeyCode::Backspace),
        "Tab" => Ok(KeyCode::Tab),
        "Space" | " " => Ok(KeyCode::Char(' ')),
        "Left" => Ok(KeyCode::Left),
        "Right" => Ok(KeyCode::Right),
        "Up" => Ok(KeyCode::Up),
        "Down" => Ok(KeyCode::Down),
        "Home" => Ok(KeyCode::Home),
        "End" => Ok(KeyCode::End),
        "PageUp" => Ok(KeyCode::PageUp),
        "PageDown" => Ok(KeyCode::PageDown),
        "Delete" => Ok(KeyCode::Delete),
        "F1" => Ok(KeyCode::F(1)),
        "F2" => Ok(KeyCode::F(2)),
        _ => {
            if key_str.chars().count() == 1 {
                match key_str.chars().next() {
                    Some(c) => Ok(KeyCode::Char(c)),
                    None => Err("Empty key string".to_string()),
                }
            } else {
                Err(format!("Unknown key binding: {}", key_str))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn parses_plain_and_ctrl_bindings() {
        let plain = parse_key_binding("q").unwrap();
        assert_eq!(plain.key_code, KeyCode::Char('q'));
        assert!(!plain.requires_ctrl);

        let ctrl = parse_key_binding("Ctrl+e").unwrap();
        assert_eq!(ctrl.key_code, KeyCode::Char('e'));
        assert!(ctrl.requires_ctrl);

        assert!(parse_key_binding("NotAKey").is_err());
    }

    #[test]
    fn stored_dates_parse_to_calendar_days() {
        let date = parse_stored_date("2024-06-15T22:30:00+00:00").unwrap();
        assert_eq!(date, chrono::NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        assert!(parse_stored_date("not a date").is_none());
        assert_eq!(display_date("garbage"), "garbage");
    }
}
