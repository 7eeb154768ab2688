use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::competition::CompetitionConfig;
use crate::prioritize::NarrativeThresholds;
use crate::schedule::ScheduleConfig;
use crate::titles::TitleCatalog;
use crate::validate::ValidationCriteria;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YoutubeConfig {
    pub api_base: String,
    pub timeout_ms: u64,
    pub recent_videos_limit: u32,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            api_base: "https://www.googleapis.com/youtube/v3".to_string(),
            timeout_ms: 10_000,
            recent_videos_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub validation: ValidationCriteria,
    pub narrative: NarrativeThresholds,
    pub competition: CompetitionConfig,
    pub titles: TitleCatalog,
    pub schedule: ScheduleConfig,
    pub youtube: YoutubeConfig,
}

impl AppConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), String> {
        let config_path = path.or_else(default_config_path);
        let mut config = if let Some(path) = config_path.as_ref() {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .map_err(|err| format!("failed to read config: {}", err))?;
                toml::from_str(&contents)
                    .map_err(|err| format!("failed to parse config: {}", err))?
            } else {
                AppConfig::default()
            }
        } else {
            AppConfig::default()
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| format!("failed to create config dir: {}", err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| format!("failed to serialize config: {}", err))?;
        std::fs::write(path, payload).map_err(|err| format!("failed to write config: {}", err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(base) = env::var("YOUTUBE_API_BASE") {
            if !base.trim().is_empty() {
                self.youtube.api_base = base;
            }
        }
        if let Ok(timeout) = env::var("YOUTUBE_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.youtube.timeout_ms = value;
            }
        }
        if let Ok(min_growth) = env::var("RADAR_MIN_GROWTH_RATE") {
            if let Ok(value) = min_growth.parse::<f64>() {
                self.validation.min_growth_rate = value;
            }
        }
        if let Ok(min_views) = env::var("RADAR_MIN_AVG_VIEWS") {
            if let Ok(value) = min_views.parse::<f64>() {
                self.validation.min_avg_views = value;
            }
        }
        if let Ok(max_age) = env::var("RADAR_MAX_AVG_AGE_MONTHS") {
            if let Ok(value) = max_age.parse::<f64>() {
                self.validation.max_avg_age_months = value;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("RADAR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/radar.toml")))
}
