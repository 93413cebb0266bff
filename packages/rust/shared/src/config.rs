//! Application configuration for javadocset.
//!
//! User config lives at `~/.javadocset/javadocset.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JavadocsetError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "javadocset.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".javadocset";

// ---------------------------------------------------------------------------
// Config structs (matching javadocset.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory docsets are written to when `--out` is not given.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Replace an existing docset instead of failing.
    #[serde(default)]
    pub overwrite: bool,

    /// Landing page recorded as `dashIndexFilePath`.
    #[serde(default = "default_index_page")]
    pub index_page: String,

    /// Value of `DashDocSetFamily`.
    #[serde(default = "default_docset_family")]
    pub docset_family: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            overwrite: false,
            index_page: default_index_page(),
            docset_family: default_docset_family(),
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}
fn default_index_page() -> String {
    "overview-summary.html".into()
}
fn default_docset_family() -> String {
    "java".into()
}

// ---------------------------------------------------------------------------
// Plist options (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime options for the `Info.plist` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlistOptions {
    /// Landing page relative to `Documents`.
    pub index_page: String,
    /// Documentation family tag.
    pub docset_family: String,
}

impl Default for PlistOptions {
    fn default() -> Self {
        Self {
            index_page: default_index_page(),
            docset_family: default_docset_family(),
        }
    }
}

impl From<&AppConfig> for PlistOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            index_page: config.defaults.index_page.clone(),
            docset_family: config.defaults.docset_family.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.javadocset/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| JavadocsetError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.javadocset/javadocset.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| JavadocsetError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        JavadocsetError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| JavadocsetError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| JavadocsetError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| JavadocsetError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("output_dir"));
        assert!(toml_str.contains("overview-summary.html"));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
overwrite = true
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert!(config.defaults.overwrite);
        assert_eq!(config.defaults.output_dir, ".");
        assert_eq!(config.defaults.docset_family, "java");
    }

    #[test]
    fn plist_options_from_app_config() {
        let mut app = AppConfig::default();
        app.defaults.index_page = "index.html".into();
        let opts = PlistOptions::from(&app);
        assert_eq!(opts.index_page, "index.html");
        assert_eq!(opts.docset_family, "java");
    }

    #[test]
    fn expand_home_only_touches_tilde_prefix() {
        assert_eq!(expand_home("docsets"), PathBuf::from("docsets"));
        assert_eq!(expand_home("/abs/~/x"), PathBuf::from("/abs/~/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/docsets"), home.join("docsets"));
        }
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!(
            "javadocset-config-test-{}.toml",
            uuid::Uuid::now_v7()
        ));
        std::fs::write(&path, "[defaults\noverwrite = ").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
        std::fs::remove_file(&path).ok();
    }
}
