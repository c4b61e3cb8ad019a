use crate::domain::zones::{HeartRateZones, StressThresholds};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("decimation stride for {0} must be at least 1")]
    InvalidStride(&'static str),
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendSettings {
    /// Root of the external data and annotation service
    pub base_url: String,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
        }
    }
}

/// Numeric parameters of the analytics pipeline. Defaults match the values
/// the charts were designed around.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Age used for max heart rate (220 - age)
    pub age: u32,
    pub stress_stride: usize,
    pub heart_rate_stride: usize,
    pub respiration_stride: usize,
    pub stress: StressThresholds,
    pub heart_rate: HeartRateZones,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            age: 23,
            stress_stride: 5,
            heart_rate_stride: 10,
            respiration_stride: 5,
            stress: StressThresholds::default(),
            heart_rate: HeartRateZones::default(),
        }
    }
}

impl AnalyticsConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (name, stride) in [
            ("stress", self.stress_stride),
            ("heart_rate", self.heart_rate_stride),
            ("respiration", self.respiration_stride),
        ] {
            if stride == 0 {
                return Err(ConfigError::InvalidStride(name));
            }
        }
        Ok(())
    }
}

/// `config/wearables.toml` if present, then `WEARABLES__SECTION__KEY` env vars
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/wearables").required(false))
        .add_source(
            config::Environment::with_prefix("WEARABLES")
                .separator("__")
                .try_parsing(true),
        );
    build_app_config(builder)
}

fn build_app_config(builder: ConfigBuilder<DefaultState>) -> Result<AppConfig, ConfigError> {
    let mut app_config: AppConfig = builder.build()?.try_deserialize()?;
    app_config.backend.base_url = app_config.backend.base_url.trim_end_matches('/').to_string();
    app_config.analytics.validate()?;
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        build_app_config(config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)))
    }

    #[test]
    fn test_defaults_when_nothing_is_configured() {
        let app_config = from_toml("").unwrap();
        assert_eq!(app_config.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(app_config.backend.base_url, "http://localhost:8000");
        assert_eq!(app_config.analytics.age, 23);
        assert_eq!(app_config.analytics.heart_rate_stride, 10);
        assert_eq!(app_config.analytics.stress.low_max, 50.0);
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let app_config = from_toml(
            r#"
            [backend]
            base_url = "https://data.example.org/"

            [analytics]
            age = 40
            stress_stride = 2

            [analytics.stress]
            resting_max = 20.0
            "#,
        )
        .unwrap();
        assert_eq!(app_config.backend.base_url, "https://data.example.org");
        assert_eq!(app_config.analytics.age, 40);
        assert_eq!(app_config.analytics.stress_stride, 2);
        assert_eq!(app_config.analytics.respiration_stride, 5);
        assert_eq!(app_config.analytics.stress.resting_max, 20.0);
        assert_eq!(app_config.analytics.stress.medium_max, 75.0);
    }

    #[test]
    fn test_zero_stride_is_rejected() {
        let err = from_toml("[analytics]\nheart_rate_stride = 0").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStride("heart_rate")));
    }
}
