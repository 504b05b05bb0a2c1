use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::user::UserProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default)]
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisProviderType {
    #[default]
    Gemini,
    OpenAI,
    LmStudio,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub provider: AnalysisProviderType,

    #[serde(default = "default_analysis_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_analysis_model")]
    pub model: String,

    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            provider: AnalysisProviderType::default(),
            endpoint: default_analysis_endpoint(),
            model: default_analysis_model(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: default_export_dir(),
        }
    }
}

fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lensbase")
        .join("photos.json")
}

fn default_analysis_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_analysis_model() -> String {
    "gemini-2.0-flash".to_string()
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            analysis: AnalysisConfig::default(),
            export: ExportConfig::default(),
            profile: UserProfile::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("lensbase")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gets_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.analysis.provider, AnalysisProviderType::Gemini);
        assert!(config.store_path.ends_with("lensbase/photos.json"));
        assert_eq!(config.profile.name, "Alex Rivera");
    }

    #[test]
    fn test_partial_analysis_section() {
        let config: Config = toml::from_str(
            r#"
            [analysis]
            provider = "lmstudio"
            endpoint = "http://127.0.0.1:1234/v1"
            "#,
        )
        .unwrap();
        assert_eq!(config.analysis.provider, AnalysisProviderType::LmStudio);
        assert_eq!(config.analysis.endpoint, "http://127.0.0.1:1234/v1");
        assert_eq!(config.analysis.model, default_analysis_model());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = Config::default();
        let content = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&content).unwrap();
        assert_eq!(back.analysis.endpoint, config.analysis.endpoint);
        assert_eq!(back.store_path, config.store_path);
    }
}
