//! Assistant backends and the conversation around them.

use anyhow::Result;

use crate::error::Error;
use crate::model::AssistantConfig;
use crate::store::{API_KEY_KEY, LocalStore};

mod conversation;
mod gemini;
mod prompt;
mod proxy;

pub use self::conversation::{ChatMessage, Conversation, Role};
pub use self::gemini::{
    GeminiAssistant, GenerateContentRequest, GenerateContentResponse, response_text,
};
pub use self::prompt::build_prompt;
pub use self::proxy::{ChatRequest, ChatResponse, ProxyAssistant};

/// Turns a full prompt into reply text. Any failure, including a reply of
/// the wrong shape, is an error.
pub trait Assistant {
    fn complete(&self, prompt: &str) -> Result<String>;
}

impl<A: Assistant + ?Sized> Assistant for Box<A> {
    fn complete(&self, prompt: &str) -> Result<String> {
        (**self).complete(prompt)
    }
}

/// Build the backend named by `cfg`. A missing API key is a config error.
pub fn from_config(cfg: &AssistantConfig, store: &LocalStore) -> crate::Result<Box<dyn Assistant>> {
    match cfg {
        AssistantConfig::Proxy { endpoint } => {
            if endpoint.trim().is_empty() {
                return Err(Error::Config("assistant endpoint is empty".to_string()));
            }
            Ok(Box::new(ProxyAssistant::new(endpoint.clone())?))
        }
        AssistantConfig::Gemini { model, base_url } => {
            let key: Option<String> = store.get(API_KEY_KEY)?;
            let key = key.filter(|k| !k.trim().is_empty()).ok_or_else(|| {
                Error::Config(
                    "Gemini API key is not set (run `subtrack config api-key <KEY>`)".to_string(),
                )
            })?;
            Ok(Box::new(GeminiAssistant::new(key, model.clone(), base_url.clone())?))
        }
    }
}
