//! Data models for the showcase site
//!
//! This module defines the records kept in the document store and the
//! request/response shapes used by the handlers.

use chrono::{DateTime, Utc};
use rand::{distr::Alphanumeric, Rng};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which media collection a record belongs to
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(MediaKind::Video),
            "audio" => Ok(MediaKind::Audio),
            other => Err(AppError::Validation(format!(
                "Unknown media type \"{}\". Expected \"video\" or \"audio\".",
                other
            ))),
        }
    }
}

/// A video or audio item shown in the portfolio grid
///
/// Videos carry freeform tags, audio tracks carry their genre in the same
/// list. `cover_url` is optional artwork.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MediaRecord {
    /// Random document id
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Public download URL of the stored media file
    pub url: String,

    pub cover_url: Option<String>,

    pub kind: MediaKind,

    /// Set by the server when the record is written
    pub created_at: DateTime<Utc>,
}

/// A blog post
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Post {
    pub id: String,
    pub title: String,

    /// Derived from the title; not guaranteed to be unique
    pub slug: String,

    pub content: String,
    pub youtube_url: Option<String>,
    pub cover_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A signed-in admin session, keyed by its bearer token
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Session {
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Request payload for signing in
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful sign-in
#[derive(Serialize)]
pub struct LoginResponse {
    /// Bearer token to send in the `Authorization` header
    pub token: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Query parameters for paginated public lists
///
/// # Example
/// Query string: `?filter=video&page=2&limit=20`
#[derive(Deserialize, Default)]
pub struct ListParams {
    /// `all`, `video` or `audio` (portfolio only)
    pub filter: Option<String>,

    /// Page number, starting from 1
    pub page: Option<usize>,

    /// Items per page, maximum 100
    pub limit: Option<usize>,
}

/// Blog detail: the post plus what the page needs to render it
#[derive(Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,

    /// Content split on newlines
    pub paragraphs: Vec<String>,

    pub youtube_embed_url: Option<String>,
}

/// Public hero/about/footer sections
#[derive(Serialize)]
pub struct SiteInfo {
    pub name: String,
    pub tagline: String,
    pub contact_email: String,
    pub about: String,
    pub showreel_url: Option<String>,
}

/// Generates a random 20-character document id
pub fn new_document_id() -> String {
    random_token(20)
}

pub(crate) fn random_token(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Splits a comma separated tag string, trimming each piece and dropping empties
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
