use anyhow::{Context, Result, bail};

use super::Assistant;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `{text}` on success, `{error, debug?}` on failure.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
}

impl ChatResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn with_debug(mut self, debug: impl Into<String>) -> Self {
        self.debug = Some(debug.into());
        self
    }
}

/// Client for the serverless chat proxy.
pub struct ProxyAssistant {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl ProxyAssistant {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("subtrack")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }
}

impl Assistant for ProxyAssistant {
    fn complete(&self, prompt: &str) -> Result<String> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&ChatRequest {
                message: prompt.to_string(),
            })
            .send()
            .context("assistant request")?;
        let status = resp.status();
        let body: ChatResponse = match resp.json() {
            Ok(body) => body,
            Err(_) => bail!("malformed assistant response (status {})", status),
        };

        match body {
            ChatResponse {
                text: Some(text), ..
            } if status.is_success() => Ok(text),
            ChatResponse {
                error: Some(error),
                debug,
                ..
            } => match debug {
                Some(debug) => bail!("{} ({})", error, debug),
                None => bail!("{}", error),
            },
            _ => bail!("malformed assistant response (status {})", status),
        }
    }
}
