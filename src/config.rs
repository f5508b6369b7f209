// src/config.rs
// The user's settings document: where item banks live, which are active, and how to show them.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info};
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::session::SessionConfig;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

const DEFAULT_THEME_COLORS: [&str; 6] =
    ["#F0F0F0", "#D0D0D0", "#FFFFFF", "#000000", "#008000", "#B22222"];

/// Values given on the command line that take precedence over the document.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub directory: Option<PathBuf>,
    pub display_item: Option<i32>,
    /// Replaces the active files when non-empty.
    pub active_files: Vec<String>,
    pub theme: Option<String>,
}

/// Settings loaded from a JSON document.
///
/// Every key is validated on its own; a bad value is logged and the default
/// kept. The raw document is held on to so keys this type doesn't model (such
/// as the theme table) survive a save.
#[derive(Debug, Clone)]
pub struct Settings {
    pub directory_path: PathBuf,
    pub active_files: Vec<String>,
    /// Segment shown as the question; negative means random.
    pub display_item: i32,
    pub font_size: u32,
    pub typeface: String,
    pub current_theme: String,
    pub theme_names: Vec<String>,
    pub theme_colors: Vec<String>,
    raw: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            directory_path: PathBuf::from("data/"),
            active_files: Vec::new(),
            display_item: 0,
            font_size: 44,
            typeface: "Verdana".to_string(),
            current_theme: "Default".to_string(),
            theme_names: Vec::new(),
            theme_colors: DEFAULT_THEME_COLORS.iter().map(|c| c.to_string()).collect(),
            raw: Map::new(),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, keeping defaults for anything missing or invalid.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                error!(
                    "unable to read settings file at '{}' ({}), continuing to use default values",
                    path.display(),
                    e
                );
                return Settings::default();
            }
        };

        match serde_json::from_str::<Value>(&text) {
            Ok(data) => {
                info!("Loaded settings from {}", path.display());
                Settings::from_value(data)
            }
            Err(e) => {
                error!(
                    "invalid json in settings file '{}' <{}>, continuing to use default values",
                    path.display(),
                    e
                );
                Settings::default()
            }
        }
    }

    /// Builds settings from a parsed document.
    pub fn from_value(data: Value) -> Self {
        let mut settings = Settings::default();
        let raw = match data {
            Value::Object(raw) => raw,
            other => {
                error!("settings can not load from {}, expected an object", type_name(&other));
                return settings;
            }
        };

        match raw.get("directory_path").and_then(Value::as_str) {
            Some(dir) if Path::new(dir).exists() => settings.directory_path = PathBuf::from(dir),
            _ => error!(
                "settings unable to load directory path, ensure the path exists, got {}",
                describe(raw.get("directory_path"))
            ),
        }

        match raw.get("active_files").and_then(string_list) {
            Some(files) => settings.active_files = files,
            None => error!(
                "settings unable to load active files, expected a list of strings, got {}",
                describe(raw.get("active_files"))
            ),
        }

        match raw
            .get("display_item")
            .and_then(Value::as_i64)
            .and_then(|v| i32::try_from(v).ok())
        {
            Some(item) => settings.display_item = item,
            None => error!(
                "settings unable to load display item, expected an integer, got {}",
                describe(raw.get("display_item"))
            ),
        }

        match raw
            .get("font_size")
            .and_then(Value::as_u64)
            .and_then(|v| u32::try_from(v).ok())
        {
            Some(size) => settings.font_size = size,
            None => error!(
                "settings unable to load font size, expected an integer, got {}",
                describe(raw.get("font_size"))
            ),
        }

        match raw.get("typeface").and_then(Value::as_str) {
            Some(typeface) => settings.typeface = typeface.to_string(),
            None => error!(
                "settings unable to load typeface, expected a string, got {}",
                describe(raw.get("typeface"))
            ),
        }

        match raw.get("all_themes").and_then(Value::as_object) {
            Some(themes) => settings.theme_names = themes.keys().cloned().collect(),
            None => error!(
                "settings unable to load theme names, expected an object, got {}",
                describe(raw.get("all_themes"))
            ),
        }

        settings.raw = raw;
        let theme = settings
            .raw
            .get("current_theme")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        if !settings.set_theme(&theme) {
            error!(
                "settings unable to load theme colors for '{}', expected 6 '#rrggbb' colors",
                theme
            );
        }

        settings
    }

    /// Switches to the named theme if it exists with six valid colors.
    pub fn set_theme(&mut self, name: &str) -> bool {
        let colors = self
            .raw
            .get("all_themes")
            .and_then(|themes| themes.get(name))
            .and_then(string_list)
            .filter(|colors| colors.len() == 6 && colors.iter().all(|c| is_hex_color(c)));

        match colors {
            Some(colors) => {
                self.current_theme = name.to_string();
                self.theme_colors = colors;
                true
            }
            None => false,
        }
    }

    /// Applies command-line overrides. An unknown theme is logged and the current one kept.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(directory) = overrides.directory {
            self.directory_path = directory;
        }
        if let Some(item) = overrides.display_item {
            self.display_item = item;
        }
        if !overrides.active_files.is_empty() {
            self.active_files = overrides.active_files;
        }
        if let Some(theme) = overrides.theme {
            if !self.set_theme(&theme) {
                error!("unknown theme '{}', keeping '{}'", theme, self.current_theme);
            }
        }
    }

    /// Which segment the quiz should show as the question.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            display_segment: self.display_item,
        }
    }

    /// The document as pretty JSON, current values written over the raw data.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        let mut data = self.raw.clone();
        data.insert(
            "directory_path".into(),
            Value::from(self.directory_path.to_string_lossy().into_owned()),
        );
        data.insert("active_files".into(), Value::from(self.active_files.clone()));
        data.insert("display_item".into(), Value::from(self.display_item));
        data.insert("font_size".into(), Value::from(self.font_size));
        data.insert("typeface".into(), Value::from(self.typeface.clone()));
        data.insert("current_theme".into(), Value::from(self.current_theme.clone()));
        Ok(serde_json::to_string_pretty(&Value::Object(data))?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        info!("Saved settings to {}", path.display());
        Ok(())
    }
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(String::from))
        .collect()
}

fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

fn describe(value: Option<&Value>) -> String {
    match value {
        Some(v) => format!("{} ({})", type_name(v), v),
        None => "nothing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn sample(dir: &Path) -> Value {
        json!({
            "directory_path": dir.to_string_lossy(),
            "active_files": ["spanish.sfmt", "capitals.json"],
            "display_item": -1,
            "font_size": 30,
            "typeface": "Courier",
            "current_theme": "Dark",
            "all_themes": {
                "Default": ["#F0F0F0", "#D0D0D0", "#FFFFFF", "#000000", "#008000", "#B22222"],
                "Dark": ["#101010", "#202020", "#303030", "#ffffff", "#00aa00", "#aa0000"]
            },
            "window": {"width": 800}
        })
    }

    #[test]
    fn test_from_value_reads_all_keys() {
        let dir = tempdir().unwrap();
        let settings = Settings::from_value(sample(dir.path()));
        assert_eq!(settings.directory_path, dir.path());
        assert_eq!(settings.active_files, vec!["spanish.sfmt", "capitals.json"]);
        assert_eq!(settings.display_item, -1);
        assert_eq!(settings.font_size, 30);
        assert_eq!(settings.typeface, "Courier");
        assert_eq!(settings.current_theme, "Dark");
        assert_eq!(settings.theme_names, vec!["Dark", "Default"]);
        assert_eq!(settings.theme_colors[0], "#101010");
        assert_eq!(settings.session_config(), SessionConfig { display_segment: -1 });
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let settings = Settings::from_value(json!({
            "directory_path": "/definitely/not/a/real/dir",
            "active_files": ["ok.sfmt", 3],
            "display_item": "first",
            "font_size": -2,
            "typeface": 12,
            "current_theme": "Broken",
            "all_themes": {
                "Broken": ["#fff", "#000000", "#000000", "#000000", "#000000", "#000000"]
            }
        }));
        let defaults = Settings::default();
        assert_eq!(settings.directory_path, defaults.directory_path);
        assert!(settings.active_files.is_empty());
        assert_eq!(settings.display_item, 0);
        assert_eq!(settings.font_size, 44);
        assert_eq!(settings.typeface, "Verdana");
        assert_eq!(settings.current_theme, "Default");
        assert_eq!(settings.theme_colors, defaults.theme_colors);
        assert_eq!(settings.theme_names, vec!["Broken"]);
    }

    #[test]
    fn test_non_object_document() {
        let settings = Settings::from_value(json!([1, 2, 3]));
        assert_eq!(settings.font_size, 44);
        assert!(settings.theme_names.is_empty());
    }

    #[test]
    fn test_load_missing_or_bad_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("nope.json"));
        assert_eq!(settings.typeface, "Verdana");

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{ not json").unwrap();
        assert_eq!(Settings::load(&bad).display_item, 0);
    }

    #[test]
    fn test_set_theme() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::from_value(sample(dir.path()));
        assert!(settings.set_theme("Default"));
        assert_eq!(settings.current_theme, "Default");
        assert_eq!(settings.theme_colors[5], "#B22222");
        assert!(!settings.set_theme("Missing"));
        assert_eq!(settings.current_theme, "Default");
    }

    #[test]
    fn test_save_round_trip_keeps_unknown_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut settings = Settings::from_value(sample(dir.path()));
        settings.display_item = 1;
        settings.active_files.push("extra.sfmt".to_string());
        settings.save(&path).unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["window"]["width"], 800);
        assert_eq!(saved["display_item"], 1);
        assert_eq!(saved["all_themes"]["Dark"][0], "#101010");

        let reloaded = Settings::load(&path);
        assert_eq!(reloaded.display_item, 1);
        assert_eq!(reloaded.active_files.len(), 3);
        assert_eq!(reloaded.current_theme, "Dark");
    }

    #[test]
    fn test_apply_overrides_and_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, sample(dir.path()).to_string()).unwrap();

        let mut settings = Settings::load(&path);
        settings.apply(Overrides {
            directory: Some(PathBuf::from("banks/")),
            display_item: Some(-1),
            active_files: vec!["verbs.sfmt".to_string()],
            theme: Some("Default".to_string()),
        });
        settings.save(&path).unwrap();

        let saved: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["directory_path"], "banks/");
        assert_eq!(saved["display_item"], -1);
        assert_eq!(saved["active_files"], json!(["verbs.sfmt"]));
        assert_eq!(saved["current_theme"], "Default");
        assert_eq!(saved["window"]["width"], 800);
    }

    #[test]
    fn test_apply_keeps_values_without_overrides() {
        let dir = tempdir().unwrap();
        let mut settings = Settings::from_value(sample(dir.path()));
        settings.apply(Overrides {
            theme: Some("Missing".to_string()),
            ..Overrides::default()
        });
        assert_eq!(settings.directory_path, dir.path());
        assert_eq!(settings.display_item, -1);
        assert_eq!(settings.active_files.len(), 2);
        assert_eq!(settings.current_theme, "Dark");
    }
}
