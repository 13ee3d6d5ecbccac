use crate::error::AppError;
use crate::model::{PriorityFilter, StatusFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "todoflow";
const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_ENV_VAR: &str = "TODOFLOW_CONFIG_PATH";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LandingTheme {
    #[default]
    Classic,
    Noir,
    Solarized,
}

impl LandingTheme {
    pub fn name(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Noir => "noir",
            Self::Solarized => "solarized",
        }
    }

    /// Resolves free-form theme names such as `"Dark Mode"` or `"vanilla"`.
    pub fn from_name(raw: &str) -> Option<Self> {
        match canonical_theme_name(raw).as_str() {
            "" | "classic" | "default" | "vanilla" | "light" => Some(Self::Classic),
            "noir" | "dark" | "dark_mode" | "darkmode" => Some(Self::Noir),
            "solarized" => Some(Self::Solarized),
            _ => None,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Classic => Palette {
                accent: "",
                muted: "",
                reset: "",
            },
            Self::Noir => Palette {
                accent: "\x1b[38;5;208m",
                muted: "\x1b[38;5;250m",
                reset: "\x1b[0m",
            },
            Self::Solarized => Palette {
                accent: "\x1b[38;5;108m",
                muted: "\x1b[38;5;250m",
                reset: "\x1b[0m",
            },
        }
    }
}

impl fmt::Display for LandingTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub accent: &'static str,
    pub muted: &'static str,
    pub reset: &'static str,
}

impl Palette {
    pub fn accentize(&self, text: &str) -> String {
        if self.accent.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.accent, text, self.reset)
        }
    }

    pub fn mutedize(&self, text: &str) -> String {
        if self.muted.is_empty() {
            text.to_string()
        } else {
            format!("{}{}{}", self.muted, text, self.reset)
        }
    }
}

fn canonical_theme_name(raw: &str) -> String {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    cleaned.trim_matches('_').to_string()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub status_filter: Option<StatusFilter>,
    #[serde(default)]
    pub priority_filter: Option<PriorityFilter>,
}

impl Config {
    /// Unknown theme names fall back to the classic look.
    pub fn landing_theme(&self) -> LandingTheme {
        self.theme
            .as_deref()
            .and_then(LandingTheme::from_name)
            .unwrap_or_default()
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter.unwrap_or_default()
    }

    pub fn priority_filter(&self) -> PriorityFilter {
        self.priority_filter.unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: Config,
    pub error: Option<AppError>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub theme: Option<String>,
    pub status_filter: Option<StatusFilter>,
    pub priority_filter: Option<PriorityFilter>,
}

/// Directory holding the config file and, by default, the todo store.
pub fn app_dir() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join(APP_DIR_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home).join(".config").join(APP_DIR_NAME))
    }
}

pub fn config_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    Ok(app_dir()?.join(CONFIG_FILE_NAME))
}

pub fn load_config_with_fallback() -> ConfigLoad {
    match config_path() {
        Ok(path) => load_config_with_fallback_from_path(&path),
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_with_fallback_from_path(path: &Path) -> ConfigLoad {
    if !path.exists() {
        return ConfigLoad {
            config: Config::default(),
            error: None,
        };
    }

    match load_config_from_path(path) {
        Ok(config) => ConfigLoad {
            config,
            error: None,
        },
        Err(err) => ConfigLoad {
            config: Config::default(),
            error: Some(err),
        },
    }
}

fn load_config_from_path(path: &Path) -> Result<Config, AppError> {
    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::transport(format!("{}: {}", path.display(), err)))?;
    let mut config: Config = serde_json::from_str(&content).map_err(|err| {
        AppError::invalid_data(format!("invalid JSON in {}: {}", path.display(), err))
    })?;
    config.theme = config.theme.map(|name| normalize_theme(&name));
    Ok(config)
}

fn normalize_theme(name: &str) -> String {
    match LandingTheme::from_name(name) {
        Some(theme) => theme.name().to_string(),
        None => canonical_theme_name(name),
    }
}

pub fn merge_overrides(base: &Config, overrides: &ConfigOverrides) -> Config {
    let mut merged = base.clone();
    if let Some(theme) = overrides.theme.as_deref() {
        merged.theme = Some(normalize_theme(theme));
    }
    if let Some(status_filter) = overrides.status_filter {
        merged.status_filter = Some(status_filter);
    }
    if let Some(priority_filter) = overrides.priority_filter {
        merged.priority_filter = Some(priority_filter);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::{
        Config, ConfigOverrides, LandingTheme, load_config_from_path,
        load_config_with_fallback_from_path, merge_overrides,
    };
    use crate::model::{PriorityFilter, StatusFilter};
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(file_name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("todoflow-{nanos}-{file_name}"))
    }

    #[test]
    fn load_config_missing_returns_defaults_without_error() {
        let path = temp_path("missing-config.json");
        let result = load_config_with_fallback_from_path(&path);

        assert_eq!(result.config, Config::default());
        assert!(result.error.is_none());
    }

    #[test]
    fn load_config_invalid_returns_defaults_and_error() {
        let path = temp_path("invalid-config.json");
        fs::write(&path, "{ invalid json ").unwrap();

        let result = load_config_with_fallback_from_path(&path);
        fs::remove_file(&path).ok();

        assert_eq!(result.config, Config::default());
        assert_eq!(result.error.unwrap().code(), "invalid_data");
    }

    #[test]
    fn load_config_reads_valid_file() {
        let path = temp_path("valid-config.json");
        let content = serde_json::json!({
            "theme": "Dark Mode",
            "status_filter": "active",
            "priority_filter": "high"
        });
        fs::write(&path, serde_json::to_string(&content).unwrap()).unwrap();

        let loaded = load_config_from_path(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.theme.as_deref(), Some("noir"));
        assert_eq!(loaded.landing_theme(), LandingTheme::Noir);
        assert_eq!(loaded.status_filter(), StatusFilter::Active);
        assert_eq!(loaded.priority_filter(), PriorityFilter::High);
    }

    #[test]
    fn merge_overrides_preserves_base_config() {
        let base = Config {
            theme: Some("classic".into()),
            status_filter: Some(StatusFilter::Completed),
            priority_filter: None,
        };
        let overrides = ConfigOverrides {
            theme: Some("Solarized".into()),
            priority_filter: Some(PriorityFilter::Low),
            ..ConfigOverrides::default()
        };

        let merged = merge_overrides(&base, &overrides);

        assert_eq!(base.theme.as_deref(), Some("classic"));
        assert_eq!(merged.landing_theme(), LandingTheme::Solarized);
        assert_eq!(merged.status_filter(), StatusFilter::Completed);
        assert_eq!(merged.priority_filter(), PriorityFilter::Low);
    }

    #[test]
    fn merge_overrides_with_empty_overrides_returns_clone() {
        let base = Config {
            theme: Some("noir".into()),
            ..Config::default()
        };

        assert_eq!(merge_overrides(&base, &ConfigOverrides::default()), base);
    }

    #[test]
    fn theme_names_map_to_variants() {
        assert_eq!(LandingTheme::from_name("Vanilla"), Some(LandingTheme::Classic));
        assert_eq!(LandingTheme::from_name("  "), Some(LandingTheme::Classic));
        assert_eq!(LandingTheme::from_name("dark-mode"), Some(LandingTheme::Noir));
        assert_eq!(
            LandingTheme::from_name("SOLARIZED"),
            Some(LandingTheme::Solarized)
        );
        assert_eq!(LandingTheme::from_name("oceanic"), None);
    }

    #[test]
    fn unknown_theme_falls_back_to_classic() {
        let config = Config {
            theme: Some("oceanic".into()),
            ..Config::default()
        };
        assert_eq!(config.landing_theme(), LandingTheme::Classic);
    }

    #[test]
    fn palettes_differ_per_theme() {
        assert!(LandingTheme::Classic.palette().accent.is_empty());
        assert_eq!(LandingTheme::Noir.palette().accent, "\x1b[38;5;208m");
        assert_eq!(
            LandingTheme::Solarized.palette().accentize("x"),
            "\x1b[38;5;108mx\x1b[0m"
        );
        assert_eq!(LandingTheme::Classic.palette().mutedize("x"), "x");
    }
}
