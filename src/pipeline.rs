//! Entry point for every change to the record list.
//!
//! Manual input and accepted assistant suggestions go through the same
//! validation. A change is committed locally first; when a remote session is
//! active the full list is then pushed, and a failed push is logged and
//! otherwise ignored.

use anyhow::anyhow;

use crate::assistant::{Assistant, Conversation, Role, build_prompt};
use crate::clock::{Clock, SystemClock};
use crate::error::{Error, QuotaExceeded, Result, ValidationError};
use crate::model::{QuotaTier, Record, RecordInput, SuggestionPayload, UsageState};
use crate::records::RecordStore;
use crate::remote::DocumentStore;
use crate::store::LocalStore;
use crate::suggest;
use crate::sync::{BearerToken, RemoteSync};
use crate::usage::{Metered, UsageMeter};

const NO_ASSISTANT: &str =
    "no assistant configured (run `subtrack config set --assistant-url ...` or store an API key)";

/// What one chat turn produced. Failures are already phrased for display.
#[derive(Debug)]
pub enum ChatTurn {
    /// Blank input; nothing was sent or counted.
    Ignored,
    Reply {
        text: String,
        suggestion: Option<SuggestionPayload>,
    },
    Refused {
        text: String,
        reason: QuotaExceeded,
    },
    Failed {
        text: String,
        error: Error,
    },
}

impl ChatTurn {
    pub fn text(&self) -> Option<&str> {
        match self {
            ChatTurn::Ignored => None,
            ChatTurn::Reply { text, .. }
            | ChatTurn::Refused { text, .. }
            | ChatTurn::Failed { text, .. } => Some(text),
        }
    }

    pub fn suggestion(&self) -> Option<&SuggestionPayload> {
        match self {
            ChatTurn::Reply { suggestion, .. } => suggestion.as_ref(),
            _ => None,
        }
    }
}

pub struct MutationPipeline<S> {
    records: RecordStore,
    usage: UsageMeter,
    sync: RemoteSync<S>,
    assistant: std::result::Result<Box<dyn Assistant>, String>,
    conversation: Conversation,
    tier: QuotaTier,
    clock: Box<dyn Clock>,
}

impl<S: DocumentStore> MutationPipeline<S> {
    pub fn new(records: RecordStore, usage: UsageMeter, sync: RemoteSync<S>, tier: QuotaTier) -> Self {
        Self {
            records,
            usage,
            sync,
            assistant: Err(NO_ASSISTANT.to_string()),
            conversation: Conversation::default(),
            tier,
            clock: Box::new(SystemClock),
        }
    }

    /// Load records, usage and tier from `store`.
    pub fn open(store: &LocalStore, sync: RemoteSync<S>, clock: impl Clock + 'static) -> Result<Self> {
        let cfg = store.read_config()?;
        let records = RecordStore::load(store.clone())?;
        let usage = UsageMeter::load(store.clone(), clock.today())?;
        Ok(Self::new(records, usage, sync, cfg.tier).with_clock(clock))
    }

    pub fn with_assistant(mut self, assistant: impl Assistant + 'static) -> Self {
        self.assistant = Ok(Box::new(assistant));
        self
    }

    /// Leave the assistant unavailable; `reason` is shown on each chat turn.
    pub fn without_assistant(mut self, reason: impl Into<String>) -> Self {
        self.assistant = Err(reason.into());
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn records(&self) -> &[Record] {
        self.records.records()
    }

    pub fn search(&self, filter: &str) -> Vec<&Record> {
        self.records.search(filter)
    }

    pub fn total_monthly(&self) -> u64 {
        self.records.total_monthly()
    }

    pub fn usage(&self) -> &UsageState {
        self.usage.state()
    }

    /// Usage for the current month; persists a rollover if one is due.
    pub fn usage_this_month(&mut self) -> Result<UsageState> {
        let today = self.clock.today();
        Ok(self.usage.current(today)?.clone())
    }

    pub fn tier(&self) -> QuotaTier {
        self.tier
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn sync(&self) -> &RemoteSync<S> {
        &self.sync
    }

    pub fn is_connected(&self) -> bool {
        self.sync.is_active()
    }

    /// Start a remote session and adopt the remote list as local state.
    ///
    /// Returns the number of records now held. If the remote read or the
    /// local save fails the session is discarded, so later pushes cannot
    /// create a second document or overwrite the remote list with stale data.
    pub fn connect(&mut self, token: BearerToken) -> Result<usize> {
        self.sync.ensure_session(token);
        let adopted = self
            .sync
            .pull()
            .and_then(|pulled| self.records.replace_all(pulled).map_err(Error::Storage));
        if let Err(err) = adopted {
            self.sync.end_session();
            return Err(err);
        }
        Ok(self.records.len())
    }

    pub fn disconnect(&mut self) {
        self.sync.end_session();
    }

    pub fn add_record(&mut self, input: RecordInput) -> Result<Record> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }

        let record = Record {
            id: self.fresh_id()?,
            name: name.to_string(),
            url: non_blank(input.url.as_deref()),
            category: non_blank(input.category.as_deref()),
            monthly_fee: input.coerced_fee(),
            added_at: self.clock.today(),
        };
        self.records.append(record.clone())?;
        tracing::debug!(id = %record.id, "record added");
        self.mirror();
        Ok(record)
    }

    /// Remove `id` if present. Unknown ids change nothing and push nothing.
    pub fn delete_record(&mut self, id: &str) -> Result<Option<Record>> {
        let removed = self.records.remove(id)?;
        if removed.is_some() {
            tracing::debug!(%id, "record deleted");
            self.mirror();
        }
        Ok(removed)
    }

    /// One assistant turn: quota check, request, suggestion extraction.
    pub fn ask(&mut self, message: &str) -> Result<ChatTurn> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(ChatTurn::Ignored);
        }
        self.conversation.push(Role::User, message);

        let assistant = match &self.assistant {
            Ok(assistant) => assistant,
            Err(reason) => {
                let err = Error::Config(reason.clone());
                return Ok(self.fail(err));
            }
        };

        let prompt = build_prompt(self.records.records(), message);
        let today = self.clock.today();
        let metered = match self
            .usage
            .check_and_consume(self.tier, today, || assistant.complete(&prompt))
        {
            Ok(metered) => metered,
            Err(err) => return Ok(self.fail(Error::Storage(err))),
        };

        match metered {
            Metered::Denied(reason) => {
                let text = format!(
                    "You have used all {} assistant requests for this month on the {} plan. \
                     The limit resets on {}.",
                    reason.cap, reason.tier, reason.resets_on
                );
                self.conversation.push(Role::Assistant, text.clone());
                Ok(ChatTurn::Refused { text, reason })
            }
            Metered::Failed(err) => Ok(self.fail(Error::Network(err))),
            Metered::Completed(reply) => {
                let (text, suggestion) = suggest::extract(&reply).into_parts();
                self.conversation.push(Role::Assistant, text.clone());
                if let Some(suggestion) = &suggestion {
                    self.conversation.offer(suggestion.clone());
                }
                Ok(ChatTurn::Reply { text, suggestion })
            }
        }
    }

    pub fn pending_suggestion(&self) -> Option<&SuggestionPayload> {
        self.conversation.pending_suggestion()
    }

    /// Promote the pending suggestion through [`Self::add_record`].
    pub fn accept_suggestion(&mut self) -> Result<Option<Record>> {
        let Some(suggestion) = self.conversation.take_pending() else {
            return Ok(None);
        };
        self.add_record(suggestion.into()).map(Some)
    }

    pub fn dismiss_suggestion(&mut self) -> Option<SuggestionPayload> {
        self.conversation.take_pending()
    }

    fn fail(&mut self, error: Error) -> ChatTurn {
        tracing::warn!(error = %error, "assistant turn failed");
        let text = format!("Error: {}", error);
        self.conversation.push(Role::Assistant, text.clone());
        ChatTurn::Failed { text, error }
    }

    fn mirror(&mut self) {
        if !self.sync.is_active() {
            return;
        }
        if let Err(err) = self.sync.push(self.records.records()) {
            tracing::warn!(error = %err, "remote push failed; local changes kept");
        }
    }

    fn fresh_id(&self) -> anyhow::Result<String> {
        loop {
            let id = generate_record_id()?;
            if !self.records.contains(&id) {
                return Ok(id);
            }
        }
    }
}

/// Millisecond timestamp plus random suffix.
fn generate_record_id() -> anyhow::Result<String> {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let mut bytes = [0u8; 4];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("getrandom: {:?}", e))?;
    let mut out = format!("{}-", millis);
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
