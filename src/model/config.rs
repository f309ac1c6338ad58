use serde::{Deserialize, Serialize};

use super::usage::QuotaTier;

pub const DEFAULT_DOCUMENT_NAME: &str = "subtrack-contracts.json";
pub const DEFAULT_DRIVE_URL: &str = "https://www.googleapis.com";
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub version: u32,

    #[serde(default)]
    pub tier: QuotaTier,

    #[serde(default)]
    pub remote: Option<RemoteConfig>,

    #[serde(default)]
    pub assistant: Option<AssistantConfig>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            version: 1,
            tier: QuotaTier::Free,
            remote: None,
            assistant: None,
        }
    }
}

/// Where the mirrored document lives. The bearer token is never stored here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default = "default_drive_url")]
    pub base_url: String,

    /// Upload endpoint root; the same host as `base_url` for Drive.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload_url: Option<String>,

    #[serde(default = "default_document_name")]
    pub document_name: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: default_drive_url(),
            upload_url: None,
            document_name: default_document_name(),
        }
    }
}

impl RemoteConfig {
    pub fn upload_base(&self) -> &str {
        self.upload_url.as_deref().unwrap_or(&self.base_url)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssistantConfig {
    /// Serverless proxy: `{message}` in, `{text}` or `{error}` out.
    Proxy { endpoint: String },

    /// Direct model call; the API key is kept under its own storage key.
    Gemini {
        #[serde(default = "default_gemini_model")]
        model: String,

        #[serde(default = "default_gemini_url")]
        base_url: String,
    },
}

fn default_drive_url() -> String {
    DEFAULT_DRIVE_URL.to_string()
}

fn default_document_name() -> String {
    DEFAULT_DOCUMENT_NAME.to_string()
}

fn default_gemini_model() -> String {
    DEFAULT_GEMINI_MODEL.to_string()
}

fn default_gemini_url() -> String {
    DEFAULT_GEMINI_URL.to_string()
}
