//! `multipart/related` bodies: a JSON metadata part followed by the media part.

use anyhow::{Context, Result, anyhow, bail};

use super::DocumentMetadata;

pub struct MultipartRelated {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartRelated {
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn content_type(&self) -> String {
        format!("multipart/related; boundary={}", self.boundary)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

pub fn encode_related(metadata: &DocumentMetadata, content: &[u8]) -> Result<MultipartRelated> {
    let boundary = random_boundary()?;
    let meta = serde_json::to_vec(metadata).context("serialize document metadata")?;

    let mut body = Vec::with_capacity(meta.len() + content.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(&meta);
    body.extend_from_slice(format!("\r\n--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", metadata.mime_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Ok(MultipartRelated { boundary, body })
}

/// Split a `multipart/related` body into its metadata and media parts.
pub fn decode_related(content_type: &str, body: &[u8]) -> Result<(DocumentMetadata, Vec<u8>)> {
    let boundary = content_type
        .split(';')
        .map(str::trim)
        .find_map(|p| p.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"'))
        .ok_or_else(|| anyhow!("multipart content type has no boundary"))?;
    if !content_type.trim_start().starts_with("multipart/related") {
        bail!("expected multipart/related, got {}", content_type);
    }

    let delimiter = format!("--{}", boundary);
    let mut parts = Vec::new();
    let mut rest = body;
    let first = find(rest, delimiter.as_bytes()).context("missing first boundary")?;
    rest = &rest[first + delimiter.len()..];
    loop {
        if rest.starts_with(b"--") {
            break;
        }
        let next = find(rest, delimiter.as_bytes()).context("unterminated multipart part")?;
        parts.push(part_body(&rest[..next])?);
        rest = &rest[next + delimiter.len()..];
    }

    let [meta, media]: [&[u8]; 2] = parts
        .try_into()
        .map_err(|p: Vec<&[u8]>| anyhow!("expected 2 multipart parts, got {}", p.len()))?;
    let metadata: DocumentMetadata =
        serde_json::from_slice(meta).context("parse document metadata part")?;
    Ok((metadata, media.to_vec()))
}

fn part_body(raw: &[u8]) -> Result<&[u8]> {
    let raw = raw.strip_prefix(b"\r\n").unwrap_or(raw);
    let split = find(raw, b"\r\n\r\n").context("multipart part has no header terminator")?;
    let content = &raw[split + 4..];
    Ok(content.strip_suffix(b"\r\n").unwrap_or(content))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn random_boundary() -> Result<String> {
    let mut bytes = [0u8; 12];
    getrandom::getrandom(&mut bytes).map_err(|e| anyhow!("getrandom: {:?}", e))?;
    let mut out = String::from("subtrack-");
    for b in &bytes {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../tests/remote/multipart_tests.rs"]
mod tests;
