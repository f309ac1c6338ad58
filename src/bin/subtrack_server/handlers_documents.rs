use subtrack::remote::{DocumentRef, FileList, decode_related, parse_name_query};

use super::*;

#[derive(Debug, serde::Deserialize)]
pub(super) struct ListQuery {
    #[serde(default)]
    q: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct GetQuery {
    #[serde(default)]
    alt: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub(super) struct UploadQuery {
    #[serde(default, rename = "uploadType")]
    upload_type: Option<String>,
}

fn file_ref(file: &StoredFile) -> DocumentRef {
    DocumentRef {
        id: file.id.clone(),
        name: file.name.clone(),
    }
}

pub(super) async fn list_files(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ListQuery>,
) -> Response {
    let name = match q.q.as_deref() {
        None => None,
        Some(q) => match parse_name_query(q) {
            Some(name) => Some(name),
            None => return bad_request(anyhow::anyhow!("unsupported query: {}", q)),
        },
    };

    let table = state.documents.read().await;
    let files = table
        .files
        .iter()
        .filter(|f| name.as_deref().is_none_or(|n| f.name == n))
        .map(file_ref)
        .collect();
    Json(FileList { files }).into_response()
}

pub(super) async fn get_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<GetQuery>,
) -> Response {
    let table = state.documents.read().await;
    let Some(file) = table.files.iter().find(|f| f.id == id) else {
        return not_found();
    };

    if q.alt.as_deref() == Some("media") {
        return (
            [(header::CONTENT_TYPE, file.mime_type.clone())],
            file.content.clone(),
        )
            .into_response();
    }
    Json(serde_json::json!({
        "id": file.id,
        "name": file.name,
        "mimeType": file.mime_type,
        "createdTime": file.created_time,
        "modifiedTime": file.modified_time,
    }))
    .into_response()
}

pub(super) async fn create_file(
    State(state): State<Arc<AppState>>,
    Query(q): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let (metadata, content) = match parse_upload(&q, &headers, &body) {
        Ok(parts) => parts,
        Err(err) => return bad_request(err),
    };
    let id = match new_file_id() {
        Ok(id) => id,
        Err(err) => return internal_error(err),
    };

    let now = now_ts();
    let file = StoredFile {
        id,
        name: metadata.name,
        mime_type: metadata.mime_type,
        content,
        created_time: now.clone(),
        modified_time: now,
    };

    let mut table = state.documents.write().await;
    let mut next = table.clone();
    next.files.push(file.clone());
    if let Err(err) = persist_documents(&state, &next) {
        return internal_error(err);
    }
    *table = next;
    tracing::info!(id = %file.id, name = %file.name, "created document");
    (StatusCode::OK, Json(file_ref(&file))).into_response()
}

pub(super) async fn update_file(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(q): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let (metadata, content) = match parse_upload(&q, &headers, &body) {
        Ok(parts) => parts,
        Err(err) => return bad_request(err),
    };

    let mut table = state.documents.write().await;
    let mut next = table.clone();
    let Some(file) = next.files.iter_mut().find(|f| f.id == id) else {
        return not_found();
    };
    file.name = metadata.name;
    file.mime_type = metadata.mime_type;
    file.content = content;
    file.modified_time = now_ts();
    let updated = file_ref(file);

    if let Err(err) = persist_documents(&state, &next) {
        return internal_error(err);
    }
    *table = next;
    tracing::info!(id = %updated.id, "replaced document");
    Json(updated).into_response()
}

fn parse_upload(
    q: &UploadQuery,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(subtrack::remote::DocumentMetadata, String)> {
    if q.upload_type.as_deref() != Some("multipart") {
        anyhow::bail!("uploadType=multipart is required");
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .context("missing content-type")?;
    let (metadata, content) = decode_related(content_type, body)?;
    if metadata.name.trim().is_empty() {
        anyhow::bail!("document name is required");
    }
    let content = String::from_utf8(content).context("document content is not utf-8")?;
    Ok((metadata, content))
}
