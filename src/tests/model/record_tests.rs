use super::*;
use time::Month;

fn day(y: i32, m: Month, d: u8) -> Date {
    Date::from_calendar_date(y, m, d).unwrap()
}

#[test]
fn record_uses_camel_case_keys() {
    let record = Record {
        id: "1700000000000-0a0b0c0d".to_string(),
        name: "Video".to_string(),
        url: None,
        category: Some("Entertainment".to_string()),
        monthly_fee: 1500,
        added_at: day(2024, Month::May, 2),
    };
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["monthlyFee"], 1500);
    assert_eq!(value["addedAt"], "2024-05-02");
    assert!(value.get("url").is_none());

    let back: Record = serde_json::from_value(value).unwrap();
    assert_eq!(back, record);
}

#[test]
fn record_without_fee_defaults_to_zero() {
    let record: Record = serde_json::from_value(serde_json::json!({
        "id": "a",
        "name": "Music",
        "addedAt": "2024-01-31"
    }))
    .unwrap();
    assert_eq!(record.monthly_fee, 0);
    assert_eq!(record.added_at, day(2024, Month::January, 31));
}

#[test]
fn fee_text_coercion() {
    assert_eq!(FeeInput::from("1200").coerce(), 1200);
    assert_eq!(FeeInput::from(" 980 yen").coerce(), 980);
    assert_eq!(FeeInput::from("+15").coerce(), 15);
    assert_eq!(FeeInput::from("abc").coerce(), 0);
    assert_eq!(FeeInput::from("").coerce(), 0);
    assert_eq!(FeeInput::from("-300").coerce(), 0);
    assert_eq!(FeeInput::from("99999999999999999999999").coerce(), u64::MAX);
}

#[test]
fn fee_amount_coercion() {
    assert_eq!(FeeInput::Amount(1499.9).coerce(), 1499);
    assert_eq!(FeeInput::Amount(-1.0).coerce(), 0);
    assert_eq!(FeeInput::Amount(f64::NAN).coerce(), 0);
    assert_eq!(FeeInput::from(42u64).coerce(), 42);
}

#[test]
fn suggestion_payload_accepts_numeric_or_text_fee() {
    let numeric: SuggestionPayload =
        serde_json::from_str(r#"{"name":"Spotify","monthlyFee":980}"#).unwrap();
    assert_eq!(numeric.monthly_fee, Some(FeeInput::Amount(980.0)));

    let text: SuggestionPayload =
        serde_json::from_str(r#"{"name":"Spotify","monthlyFee":"980"}"#).unwrap();
    assert_eq!(text.monthly_fee, Some(FeeInput::Text("980".to_string())));

    let input = RecordInput::from(text);
    assert_eq!(input.name, "Spotify");
    assert_eq!(input.coerced_fee(), 980);
}

#[test]
fn suggestion_payload_without_name_is_empty() {
    let payload: SuggestionPayload = serde_json::from_str(r#"{"category":"Tools"}"#).unwrap();
    assert_eq!(payload.name, "");
    assert_eq!(RecordInput::from(payload).coerced_fee(), 0);
}

#[test]
fn record_input_builders() {
    let input = RecordInput::named("Cloud")
        .with_fee("300")
        .with_category("Storage")
        .with_url("https://example.com");
    assert_eq!(input.coerced_fee(), 300);
    assert_eq!(input.category.as_deref(), Some("Storage"));
    assert_eq!(input.url.as_deref(), Some("https://example.com"));
    assert_eq!(RecordInput::named("x").coerced_fee(), 0);
}
