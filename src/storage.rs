//! Object store backed by a local directory
//!
//! Uploaded files are streamed to `{root}/{key}` and exposed publicly as
//! `{public_url}/media/{key}`. Keys look like
//! `uploads/video/1768657200000_clip.mp4`.

use std::path::{Component, Path, PathBuf};

use axum::extract::multipart::Field;
use chrono::Utc;
use tokio::{fs, io::AsyncWriteExt};

use crate::error::{AppError, AppResult};

/// Path prefix under which stored objects are served
pub const MEDIA_ROUTE: &str = "/media";

/// Where an uploaded file ended up
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

pub struct Storage {
    root: PathBuf,
    public_base: String,
}

impl Storage {
    /// Creates the root directory if needed
    pub fn new(root: &Path, public_url: &str) -> AppResult<Self> {
        std::fs::create_dir_all(root)?;
        Ok(Self {
            root: root.to_path_buf(),
            public_base: format!("{}{}/", public_url.trim_end_matches('/'), MEDIA_ROUTE),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_for(&self, key: &str) -> String {
        format!("{}{}", self.public_base, key)
    }

    /// Streams one multipart file field into the store
    ///
    /// `total` is the expected size in bytes (the request's content length)
    /// and only drives progress reporting.
    pub async fn put_field(
        &self,
        prefix: &str,
        mut field: Field<'_>,
        total: Option<u64>,
    ) -> AppResult<StoredObject> {
        let name = sanitize_file_name(field.file_name().unwrap_or("upload"));
        let key = format!("{}/{}_{}", prefix, Utc::now().timestamp_millis(), name);
        let path = self.root.join(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&path).await?;
        let mut transferred: u64 = 0;
        let mut last_reported: u64 = 0;

        loop {
            let chunk = match field.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(err) => {
                    drop(file);
                    discard_partial(&path).await;
                    return Err(err.into());
                }
            };

            if let Err(err) = file.write_all(&chunk).await {
                drop(file);
                discard_partial(&path).await;
                return Err(err.into());
            }

            transferred += chunk.len() as u64;
            if let Some(total) = total {
                let step = progress_percent(transferred, total) as u64 / 10;
                if step > last_reported {
                    last_reported = step;
                    tracing::debug!(key = %key, progress = step * 10, "upload progress");
                }
            }
        }

        file.flush().await?;
        tracing::info!(key = %key, bytes = transferred, "stored object");

        Ok(StoredObject {
            url: self.url_for(&key),
            key,
        })
    }

    /// Removes the object behind a public URL
    ///
    /// Fails for URLs that were not issued by this store.
    pub async fn delete_url(&self, url: &str) -> AppResult<()> {
        let key = url.strip_prefix(&self.public_base).ok_or_else(|| {
            AppError::Validation(format!("{} is not managed by this store", url))
        })?;
        self.delete_key(key).await
    }

    pub async fn delete_key(&self, key: &str) -> AppResult<()> {
        let relative = checked_key(key)?;
        fs::remove_file(self.root.join(relative)).await?;
        tracing::info!(key = %key, "deleted object");
        Ok(())
    }
}

async fn discard_partial(path: &Path) {
    if let Err(err) = fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %err, "could not remove partial upload");
    }
}

/// Rejects keys that would escape the storage root
fn checked_key(key: &str) -> AppResult<&Path> {
    let path = Path::new(key);
    let plain = !key.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)));
    if plain {
        Ok(path)
    } else {
        Err(AppError::Validation(format!("invalid object key: {}", key)))
    }
}

/// Reduces a client supplied file name to `[A-Za-z0-9._-]`
pub fn sanitize_file_name(name: &str) -> String {
    // Browsers on Windows may send a full path.
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Upload progress as a percentage in `0.0..=100.0`
pub fn progress_percent(transferred: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (transferred as f64 / total as f64 * 100.0).min(100.0)
}
