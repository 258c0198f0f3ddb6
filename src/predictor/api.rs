use std::time::Duration;

use reqwest::{
    header::{
        ACCEPT,
        USER_AGENT,
    },
    Client,
    Response,
};

use crate::core::{
    AnswerRecord,
    CardioError,
};

pub const DEFAULT_PREDICT_URL: &str = "http://localhost:8000/predict";

#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self { url: DEFAULT_PREDICT_URL.to_string(), timeout: Duration::from_secs(30) }
    }
}

/// Thin wrapper over the prediction service. One POST per assessment, no retries.
#[derive(Debug, Clone)]
pub struct PredictorClient {
    client: Client,
    config: PredictorConfig,
}

impl PredictorClient {
    pub fn new(config: PredictorConfig) -> Result<Self, CardioError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CardioError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PredictorConfig {
        &self.config
    }

    /// Sends the flat field -> number map and returns the raw JSON body.
    /// An empty body is reported as `None` so the dashboard can treat it as absent.
    pub async fn predict(
        &self,
        answers: &AnswerRecord,
    ) -> Result<Option<serde_json::Value>, CardioError> {
        log::info!("Requesting prediction from {}", self.config.url);

        let resp = self
            .client
            .post(&self.config.url)
            .header(USER_AGENT, concat!("cardioscope/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
            .json(answers)
            .send()
            .await?;

        ensure_success(&resp)?;

        let body = resp.bytes().await?;
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }

        let payload: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(Some(payload))
    }
}

fn ensure_success(resp: &Response) -> Result<(), CardioError> {
    if !resp.status().is_success() {
        return Err(CardioError::HttpStatus {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}
