use crate::model::Record;
use crate::suggest::SUGGESTION_MARKER;

/// System instructions, the current records, then the user's message.
pub fn build_prompt(records: &[Record], user_message: &str) -> String {
    let context = if records.is_empty() {
        "(no subscriptions yet)".to_string()
    } else {
        records
            .iter()
            .map(|r| {
                format!(
                    "- {} ({}, {}/month)",
                    r.name,
                    r.category.as_deref().unwrap_or("Uncategorized"),
                    r.monthly_fee
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    format!(
        "You are an assistant for managing contracts and subscriptions.\n\
         Current subscriptions:\n\
         {context}\n\
         \n\
         Answer the user's question, and propose adding a new subscription when it helps.\n\
         To propose one, output a single line in this JSON format:\n\
         \n\
         {marker} {{\"name\": \"Service name\", \"url\": \"https://example.com\", \"category\": \"Category\", \"monthlyFee\": amount}}\n\
         \n\
         Example:\n\
         {marker} {{\"name\": \"Spotify\", \"url\": \"https://spotify.com\", \"category\": \"Entertainment\", \"monthlyFee\": 980}}\n\
         \n\
         User: {user_message}",
        marker = SUGGESTION_MARKER,
    )
}

#[cfg(test)]
#[path = "../tests/assistant/prompt_tests.rs"]
mod tests;
