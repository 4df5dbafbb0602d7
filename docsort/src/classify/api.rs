use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::ClassifierConfig;
use crate::error::{DocsortError, Result};

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    folder: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ClassifierClient {
    client: Client,
    url: String,
    fallback_label: String,
}

impl ClassifierClient {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                DocsortError::Classification(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            url: config.url.clone(),
            fallback_label: config.fallback_label.clone(),
        })
    }

    pub fn fallback_label(&self) -> &str {
        &self.fallback_label
    }

    /// Suggested folder for `text`. Never fails: transport errors, non-success
    /// statuses, unreadable bodies and empty answers all yield the fallback
    /// label.
    pub async fn classify(&self, text: &str) -> String {
        match self.request_folder(text).await {
            Ok(Some(folder)) => folder,
            Ok(None) => {
                tracing::warn!(
                    "Classifier returned no folder, using '{}'",
                    self.fallback_label
                );
                self.fallback_label.clone()
            }
            Err(e) => {
                tracing::warn!("Classification failed: {}. Using '{}'", e, self.fallback_label);
                self.fallback_label.clone()
            }
        }
    }

    async fn request_folder(&self, text: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post(&self.url)
            .json(&ClassifyRequest { text })
            .send()
            .await
            .map_err(|e| DocsortError::Classification(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DocsortError::Classification(format!(
                "Classifier responded {status}: {body}"
            )));
        }

        let parsed: ClassifyResponse = response.json().await.map_err(|e| {
            DocsortError::Classification(format!("Failed to parse response: {e}"))
        })?;

        Ok(parsed
            .folder
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty()))
    }
}
