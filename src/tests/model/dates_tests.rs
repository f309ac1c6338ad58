use super::*;

#[test]
fn calendar_month_display_and_parse() {
    let m = CalendarMonth::new(2024, Month::March);
    assert_eq!(m.to_string(), "2024-03");
    assert_eq!("2024-03".parse::<CalendarMonth>().unwrap(), m);
    assert!("2024-13".parse::<CalendarMonth>().is_err());
    assert!("March".parse::<CalendarMonth>().is_err());
}

#[test]
fn calendar_month_next_wraps_year() {
    let dec = CalendarMonth::new(2023, Month::December);
    assert_eq!(dec.next(), CalendarMonth::new(2024, Month::January));
    assert_eq!(
        CalendarMonth::new(2024, Month::January).next(),
        CalendarMonth::new(2024, Month::February)
    );
}

#[test]
fn calendar_month_orders_by_calendar() {
    assert!(CalendarMonth::new(2023, Month::December) < CalendarMonth::new(2024, Month::January));
    assert!(CalendarMonth::new(2024, Month::February) > CalendarMonth::new(2024, Month::January));
}

#[test]
fn first_day_of_month() {
    let first = CalendarMonth::new(2024, Month::February).first_day().unwrap();
    assert_eq!(format_date(first), "2024-02-01");
}

#[test]
fn date_format_is_zero_padded() {
    let d = Date::from_calendar_date(2024, Month::July, 5).unwrap();
    assert_eq!(format_date(d), "2024-07-05");
    assert_eq!(parse_date("2024-07-05").unwrap(), d);
}

#[test]
fn parse_date_rejects_garbage() {
    assert!(parse_date("2024-02-30").is_err());
    assert!(parse_date("07/05/2024").is_err());
    assert!(parse_date("").is_err());
}

#[test]
fn calendar_month_serializes_as_string() {
    let m = CalendarMonth::new(2025, Month::November);
    let json = serde_json::to_string(&m).unwrap();
    assert_eq!(json, "\"2025-11\"");
    let back: CalendarMonth = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn non_canonical_dates_are_rejected() {
    assert!(parse_date("2024-6-5").is_err());
    assert!(parse_date("+2024-06-05").is_err());
    assert!(parse_date("2024-06-05T00:00").is_err());
    assert!(parse_date(" 2024-06-05").is_err());

    assert!("2025-1".parse::<CalendarMonth>().is_err());
    assert!("+2025-01".parse::<CalendarMonth>().is_err());
    assert!("2025-01-01".parse::<CalendarMonth>().is_err());
    assert!(serde_json::from_str::<CalendarMonth>("\"2025-1\"").is_err());
}
