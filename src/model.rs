mod config;
mod dates;
mod record;
mod usage;

pub use self::config::{
    AssistantConfig, DEFAULT_DOCUMENT_NAME, DEFAULT_DRIVE_URL, DEFAULT_GEMINI_MODEL,
    DEFAULT_GEMINI_URL, RemoteConfig, TrackerConfig,
};
pub use self::dates::{CalendarMonth, format_date, iso_date, parse_date};
pub use self::record::{FeeInput, Record, RecordInput, SuggestionPayload};
pub use self::usage::{QuotaTier, UsageState};
