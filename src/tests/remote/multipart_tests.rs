use super::*;

#[test]
fn encoded_body_decodes_to_same_parts() {
    let meta = DocumentMetadata::json("subtrack-contracts.json");
    let related = encode_related(&meta, b"[{\"id\":\"1\"}]").unwrap();
    assert!(related.boundary().starts_with("subtrack-"));
    assert_eq!(
        related.content_type(),
        format!("multipart/related; boundary={}", related.boundary())
    );

    let (decoded, content) = decode_related(&related.content_type(), related.body()).unwrap();
    assert_eq!(decoded, meta);
    assert_eq!(content, b"[{\"id\":\"1\"}]");
}

#[test]
fn boundaries_are_random() {
    let meta = DocumentMetadata::json("a");
    let a = encode_related(&meta, b"[]").unwrap();
    let b = encode_related(&meta, b"[]").unwrap();
    assert_ne!(a.boundary(), b.boundary());
}

#[test]
fn decode_accepts_quoted_boundary() {
    let body = b"--xyz\r\nContent-Type: application/json\r\n\r\n{\"name\":\"n\",\"mimeType\":\"application/json\"}\r\n--xyz\r\nContent-Type: application/json\r\n\r\n[]\r\n--xyz--\r\n";
    let (meta, content) = decode_related("multipart/related; boundary=\"xyz\"", body).unwrap();
    assert_eq!(meta.name, "n");
    assert_eq!(content, b"[]");
}

#[test]
fn decode_rejects_wrong_shapes() {
    assert!(decode_related("application/json", b"[]").is_err());
    assert!(decode_related("multipart/related", b"[]").is_err());

    let one_part = b"--b\r\nContent-Type: application/json\r\n\r\n{\"name\":\"n\",\"mimeType\":\"x\"}\r\n--b--\r\n";
    let err = decode_related("multipart/related; boundary=b", one_part).unwrap_err();
    assert!(err.to_string().contains("expected 2 multipart parts"));
}
