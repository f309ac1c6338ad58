//! Wire types for the document store.

use super::DOCUMENT_MIME_TYPE;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DocumentRef>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub name: String,
    pub mime_type: String,
}

impl DocumentMetadata {
    pub fn json(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mime_type: DOCUMENT_MIME_TYPE.to_string(),
        }
    }
}

/// Quote a document name for a `name = '...'` search clause.
pub fn name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!("name = '{}' and trashed = false", escaped)
}

/// Inverse of [`name_query`]; `None` if the query has no name clause.
pub fn parse_name_query(q: &str) -> Option<String> {
    let start = q.find("name = '").map(|i| i + "name = '".len())?;
    let mut out = String::new();
    let mut chars = q[start..].chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push(chars.next()?),
            '\'' => return Some(out),
            other => out.push(other),
        }
    }
    None
}
