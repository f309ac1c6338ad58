//! Direct `generateContent` calls for setups that hold their own API key.

use anyhow::{Context, Result, anyhow, bail};

use super::Assistant;

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,

    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub message: String,
}

/// Text of the first part of the first candidate.
pub fn response_text(resp: GenerateContentResponse) -> Result<String> {
    if let Some(err) = resp.error {
        bail!("{}", err.message);
    }
    resp.candidates
        .and_then(|c| c.into_iter().next())
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| anyhow!("invalid response from Gemini"))
}

pub struct GeminiAssistant {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl GeminiAssistant {
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!("Gemini API key is empty");
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent("subtrack")
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            api_key,
            model,
            base_url,
            client,
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

impl Assistant for GeminiAssistant {
    fn complete(&self, prompt: &str) -> Result<String> {
        let resp = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .context("Gemini request")?;
        let status = resp.status();
        let body: GenerateContentResponse = resp
            .json()
            .with_context(|| format!("parse Gemini response (status {})", status))?;
        response_text(body)
    }
}
