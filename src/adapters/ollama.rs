use crate::core::{Availability, CapabilityBackend};
use crate::utils::error::{Result, SimplifierError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 透過 Ollama HTTP API 產生改寫內容的後端
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

impl OllamaBackend {
    pub fn new(base_url: &str, model: &str, request_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn has_model(&self, tags: &TagsResponse) -> bool {
        // "llama3.2" 視同 "llama3.2:latest"
        tags.models.iter().any(|tag| {
            tag.name == self.model
                || tag
                    .name
                    .split_once(':')
                    .is_some_and(|(name, _)| name == self.model)
        })
    }
}

#[async_trait]
impl CapabilityBackend for OllamaBackend {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn availability(&self) -> Result<Availability> {
        let url = format!("{}/api/tags", self.base_url);
        tracing::debug!("Probing backend at: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            tracing::debug!("Backend probe status: {}", response.status());
            return Ok(Availability::NotReady);
        }

        let tags: TagsResponse = response.json().await?;
        if self.has_model(&tags) {
            Ok(Availability::Ready)
        } else {
            tracing::debug!("Model {} not pulled on backend", self.model);
            Ok(Availability::NotReady)
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/api/generate", self.base_url);
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SimplifierError::CapabilityUnavailable {
                reason: format!("backend returned HTTP {}", status),
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.response)
    }
}
