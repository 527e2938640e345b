// ChatbotQuery - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::model::Endpoint;
use crate::util::constants;
use crate::util::error::{ConfigError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for ChatbotQuery configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/ChatbotQuery/ or %APPDATA%\ChatbotQuery\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Full path of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored so a newer config file still loads in
/// an older binary.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[backend]` section.
    pub backend: BackendSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[backend]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct BackendSection {
    /// Scheme, host and port of the chatbot service.
    pub base_url: Option<String>,
    /// Endpoint path, starting with '/'.
    pub endpoint_path: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
    /// Log file path (empty = stderr only).
    pub file: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Chatbot endpoint location.
    pub endpoint: Endpoint,
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
    /// Log file path.
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            dark_mode: false,
            font_size: constants::DEFAULT_FONT_SIZE,
            log_level: None,
            log_file: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults with one warning; the application
/// still starts.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<String>) {
    let config_path = config_dir.join(constants::CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    match read_config_file(&config_path) {
        Ok(raw) => {
            tracing::info!(path = %config_path.display(), "Loaded config.toml");
            validate(raw)
        }
        Err(e) => {
            let msg = format!("{e}. Using defaults.");
            tracing::warn!("{}", msg);
            (AppConfig::default(), vec![msg])
        }
    }
}

/// Read and parse config.toml without validating values.
pub fn read_config_file(path: &Path) -> Result<RawConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let raw = toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(raw)
}

/// Validate every field of a parsed config, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();

    // -- Backend: base_url --
    if let Some(base_url) = raw.backend.base_url {
        match check_base_url("backend.base_url", &base_url) {
            Ok(()) => config.endpoint.base_url = base_url,
            Err(e) => warnings.push(e.to_string()),
        }
    }

    // -- Backend: endpoint_path --
    if let Some(path) = raw.backend.endpoint_path {
        match check_endpoint_path("backend.endpoint_path", &path) {
            Ok(()) => config.endpoint.path = path,
            Err(e) => warnings.push(e.to_string()),
        }
    }

    let mut reject = |field: &str, value: String, expected: &str| {
        warnings.push(
            ConfigError::ValueOutOfRange {
                field: field.to_string(),
                value,
                expected: expected.to_string(),
            }
            .to_string(),
        );
    };

    // -- UI: theme --
    if let Some(theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            _ => reject("ui.theme", theme, "\"dark\" or \"light\""),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            reject(
                "ui.font_size",
                size.to_string(),
                &format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            );
        }
    }

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            reject(
                "logging.level",
                level,
                "one of error, warn, info, debug, trace",
            );
        }
    }

    // -- Logging: file --
    if let Some(file) = raw.logging.file {
        if !file.is_empty() {
            config.log_file = Some(PathBuf::from(file));
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// A backend base URL must parse and use the http or https scheme.
pub fn check_base_url(field: &str, value: &str) -> std::result::Result<(), ConfigError> {
    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: "an http:// or https:// URL".to_string(),
        }),
    }
}

/// An endpoint path must start with '/'.
pub fn check_endpoint_path(field: &str, value: &str) -> std::result::Result<(), ConfigError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: "a path starting with '/'".to_string(),
        })
    }
}

/// Apply `--base-url` / `--endpoint` on top of the configured endpoint.
///
/// Overrides go through the same checks as config.toml; a rejected override
/// leaves the configured value in place and yields a warning.
pub fn apply_endpoint_overrides(
    endpoint: &Endpoint,
    base_url: Option<String>,
    path: Option<String>,
) -> (Endpoint, Vec<String>) {
    let mut resolved = endpoint.clone();
    let mut warnings = Vec::new();

    if let Some(base_url) = base_url {
        match check_base_url("--base-url", &base_url) {
            Ok(()) => resolved.base_url = base_url,
            Err(e) => warnings.push(e.to_string()),
        }
    }
    if let Some(path) = path {
        match check_endpoint_path("--endpoint", &path) {
            Ok(()) => resolved.path = path,
            Err(e) => warnings.push(e.to_string()),
        }
    }

    for warning in &warnings {
        tracing::warn!(warning = %warning, "Command-line override rejected");
    }
    (resolved, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) {
        std::fs::write(dir.join(constants::CONFIG_FILE_NAME), content).unwrap();
    }

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(config.endpoint.to_string(), "http://127.0.0.1:8000/chatbot/");
    }

    #[test]
    fn test_valid_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
[backend]
base_url = "https://chatbot.internal:9443"
endpoint_path = "/v2/chatbot/"

[ui]
theme = "Dark"
font_size = 18.0

[logging]
level = "DEBUG"
file = "chatbot.log"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(
            config.endpoint.to_string(),
            "https://chatbot.internal:9443/v2/chatbot/"
        );
        assert!(config.dark_mode);
        assert_eq!(config.font_size, 18.0);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.log_file, Some(PathBuf::from("chatbot.log")));
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        write_config(
            dir.path(),
            r#"
[backend]
base_url = "ftp://127.0.0.1"
endpoint_path = "chatbot"

[ui]
theme = "purple"
font_size = 100.0

[logging]
level = "verbose"
"#,
        );
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 5, "warnings: {warnings:?}");
        assert!(warnings[0].contains("backend.base_url"));
        assert!(warnings[4].contains("logging.level"));
    }

    #[test]
    fn test_unparseable_file_warns_once() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[backend\nbase_url = ");
        let (config, warnings) = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_cli_overrides_replace_valid_values() {
        let (endpoint, warnings) = apply_endpoint_overrides(
            &Endpoint::default(),
            Some("https://chatbot.example:9443".to_string()),
            Some("/v2/chatbot/".to_string()),
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(endpoint.to_string(), "https://chatbot.example:9443/v2/chatbot/");
    }

    #[test]
    fn test_cli_overrides_rejected_keep_configured_endpoint() {
        let configured = Endpoint::new("http://10.0.0.5:8000", "/chatbot/");
        let (endpoint, warnings) = apply_endpoint_overrides(
            &configured,
            Some("ftp://10.0.0.5".to_string()),
            Some("chatbot/".to_string()),
        );
        assert_eq!(endpoint, configured);
        assert_eq!(warnings.len(), 2, "warnings: {warnings:?}");
        assert!(warnings[0].contains("--base-url"));
        assert!(warnings[1].contains("--endpoint"));
        assert!(warnings[1].contains("chatbot/"));
    }

    #[test]
    fn test_cli_overrides_absent_keep_endpoint() {
        let (endpoint, warnings) = apply_endpoint_overrides(&Endpoint::default(), None, None);
        assert_eq!(endpoint, Endpoint::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path(), "[future]\nsetting = 1\n[ui]\ntheme = \"dark\"\n");
        let (config, warnings) = load_config(dir.path());
        assert!(warnings.is_empty());
        assert!(config.dark_mode);
    }
}
