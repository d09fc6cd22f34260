use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{LlmProvider, Message};
use crate::errors::LlmError;

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct OpenAiProvider {
    api_key: String,
    url: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn new(api_key: String, url: String, model: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            api_key,
            url,
            model,
            client,
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, messages: &[Message]) -> Result<String, LlmError> {
        let chat_messages: Vec<_> = messages
            .iter()
            .map(|msg| {
                json!({
                    "role": msg.role,
                    "content": msg.content,
                })
            })
            .collect();

        let body = json!({
            "model": self.model,
            "messages": chat_messages,
            "temperature": 0,
        });

        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(LlmError::Endpoint {
                status: status.as_u16(),
                body: text,
            });
        }

        let data: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;

        completion_content(&data)
    }
}

/// Pulls `choices[0].message.content` out of a chat-completions reply.
pub fn completion_content(data: &serde_json::Value) -> Result<String, LlmError> {
    data["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or(LlmError::MissingContent)
}
