use serde::Deserialize;
use std::env;
use std::path::Path;

use crate::error::{Error, Result};
use crate::mood::MAX_WINDOW_DAYS;

pub const CONFIG_FILE: &str = "mindcheck.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub telemetry: TelemetryConfig,
    pub mood: MoodConfig,
    pub report: ReportConfig,
}

/// ログ出力の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        TelemetryConfig {
            log_level: "warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    /// 気分の推移を平均する日数
    pub window_days: u32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        MoodConfig { window_days: 7 }
    }
}

/// 結果の出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(Error::Config {
                message: format!("unknown report format `{other}`"),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
}

impl Config {
    /// `dir` に `mindcheck.toml` があれば読み込み、環境変数
    /// (`MINDCHECK_LOG_LEVEL`, `MINDCHECK_MOOD_WINDOW_DAYS`) で上書きする
    pub fn load(dir: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_path = dir.join(CONFIG_FILE);
        let mut config = if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Config>(&contents).map_err(|e| Error::Config {
                message: format!("failed to parse {}: {e}", config_path.display()),
            })?
        } else {
            Config::default()
        };

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(level) = env::var("MINDCHECK_LOG_LEVEL") {
            self.telemetry.log_level = level;
        }
        if let Ok(days) = env::var("MINDCHECK_MOOD_WINDOW_DAYS") {
            self.mood.window_days = days.trim().parse().map_err(|_| Error::Config {
                message: format!("MINDCHECK_MOOD_WINDOW_DAYS must be a positive integer, got `{days}`"),
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_WINDOW_DAYS).contains(&self.mood.window_days) {
            return Err(Error::Config {
                message: format!(
                    "mood.window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
                    self.mood.window_days
                ),
            });
        }
        Ok(())
    }
}
