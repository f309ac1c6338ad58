use super::*;
use time::{Date, Month};

fn record(id: &str, name: &str, category: Option<&str>, fee: u64) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        url: None,
        category: category.map(str::to_string),
        monthly_fee: fee,
        added_at: Date::from_calendar_date(2024, Month::April, 1).unwrap(),
    }
}

fn open_store() -> (tempfile::TempDir, LocalStore) {
    let tmp = tempfile::tempdir().unwrap();
    let store = LocalStore::init(tmp.path(), false).unwrap();
    (tmp, store)
}

#[test]
fn append_persists_in_order() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store.clone()).unwrap();
    assert!(records.is_empty());

    records.append(record("1", "Video", Some("Entertainment"), 1500)).unwrap();
    records.append(record("2", "Cloud", None, 300)).unwrap();

    let reloaded = RecordStore::load(store).unwrap();
    let ids: Vec<&str> = reloaded.records().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2"]);
}

#[test]
fn append_rejects_duplicate_id() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store).unwrap();
    records.append(record("1", "Video", None, 1)).unwrap();
    assert!(records.append(record("1", "Other", None, 2)).is_err());
    assert_eq!(records.len(), 1);
}

#[test]
fn remove_unknown_id_is_noop() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store.clone()).unwrap();
    assert_eq!(records.remove("missing").unwrap(), None);
    // Nothing was ever written.
    assert_eq!(store.get::<Vec<Record>>(CONTRACTS_KEY).unwrap(), None);

    records.append(record("1", "Video", None, 1)).unwrap();
    let removed = records.remove("1").unwrap().unwrap();
    assert_eq!(removed.name, "Video");
    assert!(records.is_empty());
    assert!(RecordStore::load(store).unwrap().is_empty());
}

#[test]
fn search_matches_name_or_category_case_insensitively() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store).unwrap();
    records.append(record("1", "Netflix", Some("Video"), 1490)).unwrap();
    records.append(record("2", "Spotify", Some("Music"), 980)).unwrap();
    records.append(record("3", "Dropbox", None, 1200)).unwrap();

    let names = |filter: &str| -> Vec<String> {
        records
            .search(filter)
            .into_iter()
            .map(|r| r.name.clone())
            .collect()
    };
    assert_eq!(names("netFLIX"), vec!["Netflix"]);
    assert_eq!(names("music"), vec!["Spotify"]);
    assert_eq!(names("o"), vec!["Netflix", "Spotify", "Dropbox"]);
    assert_eq!(names("  ").len(), 3);
    assert!(names("zzz").is_empty());
}

#[test]
fn total_sums_fees() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store).unwrap();
    assert_eq!(records.total_monthly(), 0);
    records.append(record("1", "a", None, 1490)).unwrap();
    records.append(record("2", "b", None, 980)).unwrap();
    assert_eq!(records.total_monthly(), 2470);
    records.append(record("3", "c", None, u64::MAX)).unwrap();
    assert_eq!(records.total_monthly(), u64::MAX);
}

#[test]
fn failed_flush_keeps_previous_state() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store.clone()).unwrap();
    records.append(record("1", "Video", None, 1)).unwrap();

    // A directory in place of the snapshot file makes the rename fail.
    let snapshot = store.path().join("contracts.json");
    std::fs::remove_file(&snapshot).unwrap();
    std::fs::create_dir(&snapshot).unwrap();
    std::fs::write(snapshot.join("blocker"), b"x").unwrap();

    assert!(records.append(record("2", "Cloud", None, 2)).is_err());
    assert_eq!(records.len(), 1);
    assert!(records.remove("1").is_err());
    assert!(records.contains("1"));
}

#[test]
fn replace_all_overwrites_snapshot() {
    let (_tmp, store) = open_store();
    let mut records = RecordStore::load(store.clone()).unwrap();
    records.append(record("1", "Old", None, 1)).unwrap();
    records
        .replace_all(vec![record("9", "Remote", None, 5)])
        .unwrap();
    let reloaded = RecordStore::load(store).unwrap();
    assert_eq!(reloaded.records().len(), 1);
    assert_eq!(reloaded.get("9").unwrap().name, "Remote");
}
