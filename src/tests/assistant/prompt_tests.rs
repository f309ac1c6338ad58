use super::*;
use time::{Date, Month};

#[test]
fn lists_records_with_category_fallback() {
    let records = vec![
        Record {
            id: "1".to_string(),
            name: "Netflix".to_string(),
            url: None,
            category: Some("Video".to_string()),
            monthly_fee: 1490,
            added_at: Date::from_calendar_date(2024, Month::May, 1).unwrap(),
        },
        Record {
            id: "2".to_string(),
            name: "Dropbox".to_string(),
            url: None,
            category: None,
            monthly_fee: 1200,
            added_at: Date::from_calendar_date(2024, Month::May, 2).unwrap(),
        },
    ];
    let prompt = build_prompt(&records, "How much do I pay?");
    assert!(prompt.contains("- Netflix (Video, 1490/month)"));
    assert!(prompt.contains("- Dropbox (Uncategorized, 1200/month)"));
    assert!(prompt.ends_with("User: How much do I pay?"));
}

#[test]
fn empty_list_and_marker_instructions() {
    let prompt = build_prompt(&[], "hi");
    assert!(prompt.contains("(no subscriptions yet)"));
    assert!(prompt.contains("SUGGEST: {\"name\": \"Spotify\""));
}
