use super::*;
use crate::remote::MemoryDocuments;
use time::{Date, Month};

const DOC: &str = "subtrack-contracts.json";

fn token() -> BearerToken {
    BearerToken::new("token-1")
}

fn record(id: &str, name: &str) -> Record {
    Record {
        id: id.to_string(),
        name: name.to_string(),
        url: None,
        category: None,
        monthly_fee: 100,
        added_at: Date::from_calendar_date(2024, Month::May, 1).unwrap(),
    }
}

#[test]
fn pull_without_session_is_config_error() {
    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    assert!(matches!(sync.pull(), Err(Error::Config(_))));
    assert!(matches!(sync.push(&[]), Err(Error::Config(_))));
}

#[test]
fn first_pull_creates_empty_document() {
    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    sync.ensure_session(token());
    assert!(sync.pull().unwrap().is_empty());

    let docs = sync.store().documents().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].name, DOC);
    assert_eq!(docs[0].content, b"[]");
    assert_eq!(
        sync.session().unwrap().document_id(),
        Some(docs[0].id.as_str())
    );

    // A second pull finds the document instead of creating another.
    sync.pull().unwrap();
    assert_eq!(sync.store().documents().unwrap().len(), 1);
}

#[test]
fn push_replaces_known_document() {
    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    sync.ensure_session(token());
    sync.pull().unwrap();
    sync.push(&[record("1", "Video"), record("2", "Music")]).unwrap();

    let docs = sync.store().documents().unwrap();
    assert_eq!(docs.len(), 1);
    let pulled = decode_records(&docs[0].content);
    assert_eq!(pulled.len(), 2);
    assert_eq!(pulled[1].name, "Music");
}

#[test]
fn push_before_pull_creates_then_reuses_document() {
    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    sync.ensure_session(token());
    sync.push(&[record("1", "Video")]).unwrap();
    sync.push(&[]).unwrap();
    let docs = sync.store().documents().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].content, b"[]");
}

#[test]
fn duplicate_documents_use_the_oldest() {
    let store = MemoryDocuments::new();
    let oldest = store
        .insert(DOC, br#"[{"id":"a","name":"Old","addedAt":"2024-01-01"}]"#)
        .unwrap();
    store
        .insert(DOC, br#"[{"id":"b","name":"New","addedAt":"2024-01-02"}]"#)
        .unwrap();

    let mut sync = RemoteSync::new(store, DOC);
    sync.ensure_session(token());
    let pulled = sync.pull().unwrap();
    assert_eq!(pulled.len(), 1);
    assert_eq!(pulled[0].name, "Old");
    assert_eq!(sync.session().unwrap().document_id(), Some(oldest.as_str()));
}

#[test]
fn ensure_session_keeps_document_for_same_token() {
    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    sync.ensure_session(token());
    sync.pull().unwrap();
    let id = sync.session().unwrap().document_id().map(str::to_string);

    sync.ensure_session(token());
    assert_eq!(sync.session().unwrap().document_id().map(str::to_string), id);

    sync.ensure_session(BearerToken::new("token-2"));
    assert_eq!(sync.session().unwrap().document_id(), None);

    assert!(sync.end_session().is_some());
    assert!(!sync.is_active());
}

#[test]
fn store_failures_are_network_errors() {
    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    sync.ensure_session(BearerToken::new(""));
    assert!(matches!(sync.pull(), Err(Error::Network(_))));

    let mut sync = RemoteSync::new(MemoryDocuments::new(), DOC);
    sync.ensure_session(token());
    sync.pull().unwrap();
    sync.store().set_fail_writes(true).unwrap();
    assert!(matches!(sync.push(&[]), Err(Error::Network(_))));
}

#[test]
fn decode_is_lenient() {
    assert!(decode_records(b"{\"not\":\"an array\"}").is_empty());
    assert!(decode_records(b"garbage").is_empty());

    let records = decode_records(
        br#"[
            {"id":"1","name":"A","addedAt":"2024-01-01"},
            {"id":"2"},
            42,
            {"id":"1","name":"Dup","addedAt":"2024-01-01"},
            {"id":"3","name":"C","monthlyFee":5,"addedAt":"2024-02-01"}
        ]"#,
    );
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn token_debug_is_redacted() {
    assert_eq!(format!("{:?}", BearerToken::new("s3cret")), "BearerToken(***)");
}

#[test]
fn pushing_what_was_pulled_keeps_record_content() {
    let store = MemoryDocuments::new();
    let original = vec![record("1", "Video"), record("2", "Music")];
    store
        .insert(DOC, &serde_json::to_vec(&original).unwrap())
        .unwrap();

    let mut sync = RemoteSync::new(store, DOC);
    sync.ensure_session(token());
    let pulled = sync.pull().unwrap();
    sync.push(&pulled).unwrap();

    let docs = sync.store().documents().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(decode_records(&docs[0].content), original);
}
