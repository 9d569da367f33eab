use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::FrigateLogError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub frigate: FrigateConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the Frigate API and its media live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrigateConfig {
    /// Base of the review API, previews and fallback thumbnails.
    pub api_base: String,
    /// Base of the HLS VOD endpoint.
    pub vod_base: String,
    /// Base that serves files from the media directory.
    pub thumb_base: String,
    /// On-disk prefix Frigate reports in `thumb_path`.
    pub media_prefix: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub pre_padding_secs: f64,
    pub post_padding_secs: f64,
    /// Offset used for fallback event times. Host offset when unset.
    pub utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub path_template: String,
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub config_path: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pre_padding_secs: 5.0,
            post_padding_secs: 10.0,
            utc_offset_minutes: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path_template: "/config/www/frigate_${DATE}.log".to_string(),
        }
    }
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            frigate: FrigateConfig {
                api_base: "http://192.168.86.244:5000".to_string(),
                vod_base: "http://192.168.86.243:5000".to_string(),
                thumb_base: "https://192.168.86.244:8971".to_string(),
                media_prefix: "/media/frigate".to_string(),
                timeout_secs: 5,
            },
            render: RenderConfig::default(),
            output: OutputConfig::default(),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        let output = toml::to_string_pretty(self).context("render config TOML")?;
        Ok(output)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("read config at {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
        let contents = self.to_toml_string()?;
        fs::write(path, contents).with_context(|| format!("write config at {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FrigateLogError> {
        let bases = [
            ("frigate.api_base", &self.frigate.api_base),
            ("frigate.vod_base", &self.frigate.vod_base),
            ("frigate.thumb_base", &self.frigate.thumb_base),
        ];
        for (key, value) in bases {
            if value.trim().is_empty() {
                return Err(FrigateLogError::InvalidConfig(format!("{key} is empty")));
            }
        }
        if self.frigate.timeout_secs == 0 {
            return Err(FrigateLogError::InvalidConfig(
                "frigate.timeout_secs must be at least 1".to_string(),
            ));
        }
        let paddings = [
            ("render.pre_padding_secs", self.render.pre_padding_secs),
            ("render.post_padding_secs", self.render.post_padding_secs),
        ];
        for (key, value) in paddings {
            if !value.is_finite() || value < 0.0 {
                return Err(FrigateLogError::InvalidConfig(format!(
                    "{key} must be a non-negative number"
                )));
            }
        }
        if self.output.path_template.trim().is_empty() {
            return Err(FrigateLogError::InvalidConfig(
                "output.path_template is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl ConfigPaths {
    pub fn resolve() -> Result<Self> {
        let project_dirs = ProjectDirs::from("io", "frigate-day-log", "frigate-day-log")
            .ok_or_else(|| anyhow::anyhow!("unable to determine project directories"))?;
        Ok(Self {
            config_path: project_dirs.config_dir().join("config.toml"),
        })
    }
}
