//! HTTP request handlers
//!
//! - `auth` - sign-in, sign-out and the current admin
//! - `media` - video/audio uploads, the admin content list and deletes
//! - `posts` - blog publishing, listing and deletes
//! - `public` - everything anonymous visitors see

pub mod auth;
pub mod media;
pub mod posts;
pub mod public;

use std::collections::HashMap;

use axum::{
    extract::Multipart,
    http::{header::CONTENT_LENGTH, HeaderMap},
};

use crate::error::AppResult;
use crate::storage::{Storage, StoredObject};

/// The fields of a multipart form once its files have been stored
///
/// File fields listed in `file_prefixes` are streamed straight to storage as
/// they arrive; every other field is read as text.
pub(crate) struct UploadForm {
    text: HashMap<String, String>,
    files: HashMap<String, StoredObject>,
}

impl UploadForm {
    pub(crate) async fn read(
        storage: &Storage,
        multipart: &mut Multipart,
        file_prefixes: &[(&str, &str)],
        total: Option<u64>,
    ) -> AppResult<Self> {
        let mut form = UploadForm {
            text: HashMap::new(),
            files: HashMap::new(),
        };

        if let Err(err) = form.collect(storage, multipart, file_prefixes, total).await {
            form.discard(storage).await;
            return Err(err);
        }

        Ok(form)
    }

    async fn collect(
        &mut self,
        storage: &Storage,
        multipart: &mut Multipart,
        file_prefixes: &[(&str, &str)],
        total: Option<u64>,
    ) -> AppResult<()> {
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();

            let prefix = file_prefixes
                .iter()
                .find(|(field_name, _)| *field_name == name)
                .map(|(_, prefix)| *prefix);

            match prefix {
                Some(prefix) => {
                    // An empty file input still sends a part with no file name.
                    let chosen = field.file_name().is_some_and(|n| !n.is_empty());
                    if !chosen || self.files.contains_key(&name) {
                        continue;
                    }
                    let stored = storage.put_field(prefix, field, total).await?;
                    self.files.insert(name, stored);
                }
                None => {
                    let value = field.text().await?;
                    self.text.insert(name, value);
                }
            }
        }

        Ok(())
    }

    /// Trimmed text value, `None` when absent or blank
    pub(crate) fn text(&self, name: &str) -> Option<&str> {
        self.text
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Untrimmed text value
    pub(crate) fn raw(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    pub(crate) fn has_file(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    pub(crate) fn take_file(&mut self, name: &str) -> Option<StoredObject> {
        self.files.remove(name)
    }

    /// Best-effort removal of every stored file
    pub(crate) async fn discard(self, storage: &Storage) {
        for object in self.files.into_values() {
            if let Err(err) = storage.delete_key(&object.key).await {
                tracing::warn!(key = %object.key, error = %err, "could not discard upload");
            }
        }
    }
}

/// Request body size, when the client announced it
pub(crate) fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Best-effort removal of a stored file referenced by a record
///
/// Failures are logged and swallowed so the document delete still happens.
pub(crate) async fn remove_stored(storage: &Storage, url: &str) {
    if let Err(err) = storage.delete_url(url).await {
        tracing::warn!(url = %url, error = %err, "file delete failed (might not exist)");
    }
}
