//! Error taxonomy surfaced by the mutation pipeline.

use crate::model::{CalendarMonth, QuotaTier};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    QuotaExceeded(#[from] QuotaExceeded),

    /// A failed or malformed response from the document store or assistant.
    #[error("network error: {0:#}")]
    Network(anyhow::Error),

    /// A missing credential, token, or endpoint.
    #[error("not configured: {0}")]
    Config(String),

    /// Local durable storage failed; in-memory state is unchanged.
    #[error("storage error: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Storage(err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("monthly AI limit reached ({used}/{cap} on the {tier} tier); resets {resets_on}")]
pub struct QuotaExceeded {
    pub tier: QuotaTier,
    pub used: u32,
    pub cap: u32,
    pub period: CalendarMonth,
    /// First day of the next counting window, `YYYY-MM-DD`.
    pub resets_on: String,
}
