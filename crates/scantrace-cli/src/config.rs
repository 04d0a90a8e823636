use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// On-disk configuration, all optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub api_key: Option<String>,
}

impl FileConfig {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scantrace").join("config.toml"))
    }
}

/// Effective settings after merging flag, environment, and config file.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Settings {
    /// Resolution priority: `--api-url` flag, then `SCANTRACE_API_URL`, then
    /// the config file, then the local default. The API key comes from
    /// `SCANTRACE_API_KEY` or the config file.
    pub fn resolve(flag_api_url: Option<String>) -> Result<Self> {
        let file = match FileConfig::default_path() {
            Some(path) => FileConfig::load_from(&path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(flag_api_url, file))
    }

    fn merge(flag_api_url: Option<String>, file: FileConfig) -> Self {
        let api_url = flag_api_url
            .or_else(|| std::env::var("SCANTRACE_API_URL").ok())
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let api_key = std::env::var("SCANTRACE_API_KEY").ok().or(file.api_key);

        Settings { api_url, api_key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = FileConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert!(config.api_url.is_none());
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_file_values_parse() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_url = \"https://scans.example.com\"\napi_key = \"sk-123\"\n",
        )
        .unwrap();

        let config = FileConfig::load_from(&path).unwrap();
        assert_eq!(config.api_url.as_deref(), Some("https://scans.example.com"));
        assert_eq!(config.api_key.as_deref(), Some("sk-123"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_url = [not toml").unwrap();

        assert!(FileConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_flag_beats_file() {
        let file = FileConfig {
            api_url: Some("https://from-file.example.com".to_string()),
            api_key: None,
        };
        let settings = Settings::merge(Some("https://from-flag.example.com".to_string()), file);
        assert_eq!(settings.api_url, "https://from-flag.example.com");
    }
}
