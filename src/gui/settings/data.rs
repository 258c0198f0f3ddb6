use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};

use crate::predictor::{
    api::DEFAULT_PREDICT_URL,
    PredictorConfig,
};

pub const PREDICT_URL_ENV: &str = "CARDIOSCOPE_PREDICT_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub prediction_url: String,
    pub request_timeout_secs: u64,
    pub dark_mode: bool,
    pub reduce_motion: bool,
    pub gauge_duration_ms: u64,
    pub gauge_delay_ms: u64,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            prediction_url: DEFAULT_PREDICT_URL.to_string(),
            request_timeout_secs: 30,
            dark_mode: true,
            reduce_motion: false,
            gauge_duration_ms: 2000,
            gauge_delay_ms: 700,
        }
    }
}

impl SettingsData {
    pub const FILE_NAME: &'static str = "settings.json";

    pub fn predictor_config(&self) -> PredictorConfig {
        PredictorConfig {
            url: self.prediction_url.trim().to_string(),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }

    pub fn gauge_delay(&self) -> Duration {
        Duration::from_millis(self.gauge_delay_ms)
    }

    pub fn gauge_duration(&self) -> Duration {
        Duration::from_millis(self.gauge_duration_ms)
    }

    /// Environment wins over the saved URL for this run only.
    pub fn with_env_override(mut self, env_url: Option<String>) -> Self {
        if let Some(url) = env_url.filter(|url| !url.trim().is_empty()) {
            log::info!("Using prediction URL from {}: {}", PREDICT_URL_ENV, url);
            self.prediction_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings: SettingsData =
            serde_json::from_str(r#"{ "prediction_url": "http://example.test/predict" }"#).unwrap();
        assert_eq!(settings.prediction_url, "http://example.test/predict");
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.dark_mode);
        assert_eq!(settings.gauge_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_env_override() {
        let settings = SettingsData::default()
            .with_env_override(Some("http://10.0.0.2:8000/predict".to_string()));
        assert_eq!(settings.prediction_url, "http://10.0.0.2:8000/predict");

        let unchanged = SettingsData::default().with_env_override(Some("  ".to_string()));
        assert_eq!(unchanged.prediction_url, DEFAULT_PREDICT_URL);
        assert_eq!(SettingsData::default().with_env_override(None), SettingsData::default());
    }

    #[test]
    fn test_predictor_config_clamps_timeout() {
        let settings = SettingsData {
            prediction_url: " http://host/predict ".to_string(),
            request_timeout_secs: 0,
            ..Default::default()
        };
        let config = settings.predictor_config();
        assert_eq!(config.url, "http://host/predict");
        assert_eq!(config.timeout, Duration::from_secs(1));
    }
}
