//! `DocumentStore` over HTTP.

use super::*;

impl DocumentStore for DriveClient {
    fn list_by_name(&self, token: &BearerToken, name: &str) -> Result<Vec<DocumentRef>> {
        let q = name_query(name);
        with_retries("list documents", || {
            let resp = self
                .client
                .get(self.url("/drive/v3/files"))
                .header(reqwest::header::AUTHORIZATION, self.auth(token))
                .query(&[
                    ("q", q.as_str()),
                    ("fields", "files(id,name)"),
                    ("orderBy", "createdTime"),
                    ("spaces", "drive"),
                ])
                .send()
                .context("list documents")?;
            let list: FileList = self
                .ensure_ok(resp, "list documents")?
                .json()
                .context("parse document list")?;
            Ok(list.files)
        })
    }

    fn read_content(&self, token: &BearerToken, id: &str) -> Result<Vec<u8>> {
        with_retries("read document", || {
            let resp = self
                .client
                .get(self.url(&format!("/drive/v3/files/{}", id)))
                .header(reqwest::header::AUTHORIZATION, self.auth(token))
                .query(&[("alt", "media")])
                .send()
                .context("read document")?;
            let bytes = self
                .ensure_ok(resp, "read document")?
                .bytes()
                .context("read document bytes")?;
            Ok(bytes.to_vec())
        })
    }

    fn create(
        &self,
        token: &BearerToken,
        metadata: &DocumentMetadata,
        content: &[u8],
    ) -> Result<DocumentRef> {
        let body = encode_related(metadata, content)?;
        let resp = self
            .client
            .post(self.upload_url("/upload/drive/v3/files"))
            .header(reqwest::header::AUTHORIZATION, self.auth(token))
            .header(reqwest::header::CONTENT_TYPE, body.content_type())
            .query(&[("uploadType", "multipart"), ("fields", "id,name")])
            .body(body.into_body())
            .send()
            .context("create document")?;
        let created: DocumentRef = self
            .ensure_ok(resp, "create document")?
            .json()
            .context("parse created document")?;
        Ok(created)
    }

    fn replace(
        &self,
        token: &BearerToken,
        id: &str,
        metadata: &DocumentMetadata,
        content: &[u8],
    ) -> Result<DocumentRef> {
        let body = encode_related(metadata, content)?;
        let resp = self
            .client
            .patch(self.upload_url(&format!("/upload/drive/v3/files/{}", id)))
            .header(reqwest::header::AUTHORIZATION, self.auth(token))
            .header(reqwest::header::CONTENT_TYPE, body.content_type())
            .query(&[("uploadType", "multipart"), ("fields", "id,name")])
            .body(body.into_body())
            .send()
            .context("replace document")?;
        let replaced: DocumentRef = self
            .ensure_ok(resp, "replace document")?
            .json()
            .context("parse replaced document")?;
        Ok(replaced)
    }
}
