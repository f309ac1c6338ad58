use crate::model::SuggestionPayload;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Transcript of one chat session plus the suggestion awaiting a decision.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
    pending: Option<SuggestionPayload>,
}

impl Conversation {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
    }

    pub fn pending_suggestion(&self) -> Option<&SuggestionPayload> {
        self.pending.as_ref()
    }

    /// A newer suggestion replaces any undecided one.
    pub fn offer(&mut self, suggestion: SuggestionPayload) {
        self.pending = Some(suggestion);
    }

    pub fn take_pending(&mut self) -> Option<SuggestionPayload> {
        self.pending.take()
    }
}
