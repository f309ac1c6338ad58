//! Extraction of record proposals embedded in assistant replies.
//!
//! A proposal is the literal marker `SUGGEST:` followed by one JSON object on
//! the same line, e.g. `SUGGEST: {"name": "Video", "monthlyFee": 1500}`. The
//! object ends at the first closing brace. Parsing is two-staged: the marker
//! and object span are located first, then the object is decoded against the
//! payload schema. Nothing here fails; a bad payload just means plain text.

use crate::model::SuggestionPayload;

pub const SUGGESTION_MARKER: &str = "SUGGEST:";

/// Shown in place of the reply when the proposal was all it contained.
pub const SUGGESTION_PLACEHOLDER: &str = "Would you like to add this subscription?";

#[derive(Clone, Debug, PartialEq)]
pub enum SuggestionOutcome {
    Found(SuggestionPayload),
    NotFound,
    /// A marker and object were present but the object did not decode.
    Malformed { raw: String, reason: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Extraction {
    pub display_text: String,
    pub outcome: SuggestionOutcome,
}

impl Extraction {
    pub fn suggestion(&self) -> Option<&SuggestionPayload> {
        match &self.outcome {
            SuggestionOutcome::Found(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn into_parts(self) -> (String, Option<SuggestionPayload>) {
        match self.outcome {
            SuggestionOutcome::Found(payload) => (self.display_text, Some(payload)),
            _ => (self.display_text, None),
        }
    }
}

pub fn extract(text: &str) -> Extraction {
    let Some(span) = locate(text) else {
        return Extraction {
            display_text: text.to_string(),
            outcome: SuggestionOutcome::NotFound,
        };
    };

    let object = &text[span.object_start..span.end];
    match decode(object) {
        Ok(payload) => Extraction {
            display_text: strip_span(text, span.start, span.end),
            outcome: SuggestionOutcome::Found(payload),
        },
        Err(reason) => {
            tracing::debug!(%reason, "ignoring malformed suggestion payload");
            Extraction {
                display_text: text.to_string(),
                outcome: SuggestionOutcome::Malformed {
                    raw: object.to_string(),
                    reason,
                },
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    /// Byte offset of the marker.
    start: usize,
    /// Byte offset of the opening brace.
    object_start: usize,
    /// One past the closing brace.
    end: usize,
}

fn locate(text: &str) -> Option<Span> {
    let mut from = 0;
    while let Some(rel) = text[from..].find(SUGGESTION_MARKER) {
        let start = from + rel;
        let after = start + SUGGESTION_MARKER.len();
        let rest = &text[after..];
        let object_start = after + (rest.len() - rest.trim_start().len());

        if text[object_start..].starts_with('{') {
            for (i, c) in text[object_start..].char_indices() {
                match c {
                    '}' => {
                        return Some(Span {
                            start,
                            object_start,
                            end: object_start + i + 1,
                        });
                    }
                    '\n' | '\r' | '\u{2028}' | '\u{2029}' => break,
                    _ => {}
                }
            }
        }
        from = after;
    }
    None
}

fn decode(object: &str) -> Result<SuggestionPayload, String> {
    let value: serde_json::Value = serde_json::from_str(object).map_err(|e| e.to_string())?;
    if !value.is_object() {
        return Err("payload is not a JSON object".to_string());
    }
    serde_json::from_value(value).map_err(|e| e.to_string())
}

fn strip_span(text: &str, start: usize, end: usize) -> String {
    let before = text[..start].trim_end();
    let after = text[end..].trim_start();
    let leading_gap = &text[before.len()..start];
    let trailing_gap = &text[end..text.len() - after.len()];
    let joiner = if leading_gap.contains('\n') || trailing_gap.contains('\n') {
        "\n"
    } else {
        " "
    };

    let joined = match (before.is_empty(), after.is_empty()) {
        (true, true) => String::new(),
        (false, true) => before.to_string(),
        (true, false) => after.to_string(),
        (false, false) => format!("{}{}{}", before, joiner, after),
    };
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        SUGGESTION_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "tests/suggest_tests.rs"]
mod tests;
