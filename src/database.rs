//! Document store: table definitions and record access
//!
//! Every collection is a redb table keyed by document id with the record
//! serialized as JSON. Collections are small enough that lists are read in
//! full and sorted newest first in memory.

use std::sync::Arc;

use chrono::Utc;
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::AppResult;
use crate::live::LiveHub;
use crate::model::{MediaKind, MediaRecord, Post, Session};
use crate::storage::Storage;

/// Video documents, keyed by document id
pub const TABLE_VIDEOS: TableDefinition<&str, &str> = TableDefinition::new("videos_v1");

/// Audio documents, keyed by document id
pub const TABLE_AUDIOS: TableDefinition<&str, &str> = TableDefinition::new("audios_v1");

/// Blog post documents, keyed by document id
pub const TABLE_POSTS: TableDefinition<&str, &str> = TableDefinition::new("posts_v1");

/// Admin sessions, keyed by bearer token
pub const TABLE_SESSIONS: TableDefinition<&str, &str> = TableDefinition::new("sessions_v1");

type Collection = TableDefinition<'static, &'static str, &'static str>;

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe reference to the embedded database
    pub db: Arc<Database>,

    /// Object store for uploaded files
    pub storage: Arc<Storage>,

    /// Change notifications for live snapshot streams
    pub live: LiveHub,

    pub config: Arc<Config>,
}

impl AppState {
    /// Opens the database and storage directory named by `config`
    pub fn open(config: Config) -> AppResult<Self> {
        let db = init_db(&config.database_url)?;
        let storage = Storage::new(&config.storage_dir, &config.public_url)?;

        Ok(Self {
            db: Arc::new(db),
            storage: Arc::new(storage),
            live: LiveHub::new(),
            config: Arc::new(config),
        })
    }
}

/// Initializes the embedded database and creates required tables
///
/// # Example
///
/// ```no_run
/// # use showcase::database::init_db;
/// let db = init_db("data.db").expect("Failed to initialize database");
/// ```
pub fn init_db(db_path: &str) -> Result<Database, redb::Error> {
    let db = Database::create(db_path)?;

    let write_txn = db.begin_write()?;
    {
        write_txn.open_table(TABLE_VIDEOS)?;
        write_txn.open_table(TABLE_AUDIOS)?;
        write_txn.open_table(TABLE_POSTS)?;
        write_txn.open_table(TABLE_SESSIONS)?;
    }
    write_txn.commit()?;

    Ok(db)
}

fn media_table(kind: MediaKind) -> Collection {
    match kind {
        MediaKind::Video => TABLE_VIDEOS,
        MediaKind::Audio => TABLE_AUDIOS,
    }
}

fn put<T: Serialize>(
    db: &Database,
    table: Collection,
    key: &str,
    value: &T,
) -> AppResult<()> {
    let json = serde_json::to_string(value)?;

    let write_txn = db.begin_write()?;
    {
        let mut table = write_txn.open_table(table)?;
        table.insert(key, json.as_str())?;
    }
    write_txn.commit()?;

    Ok(())
}

fn get<T: DeserializeOwned>(
    db: &Database,
    table: Collection,
    key: &str,
) -> AppResult<Option<T>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(table)?;

    match table.get(key)? {
        Some(guard) => Ok(Some(serde_json::from_str(guard.value())?)),
        None => Ok(None),
    }
}

/// Removes a document, returning whether it existed
fn remove(db: &Database, table: Collection, key: &str) -> AppResult<bool> {
    let write_txn = db.begin_write()?;
    let existed = {
        let mut table = write_txn.open_table(table)?;
        let removed = table.remove(key)?;
        removed.is_some()
    };
    write_txn.commit()?;

    Ok(existed)
}

fn scan<T: DeserializeOwned>(db: &Database, table: Collection) -> AppResult<Vec<T>> {
    let read_txn = db.begin_read()?;
    let table = read_txn.open_table(table)?;

    let mut records = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        match serde_json::from_str::<T>(value.value()) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(key = key.value(), error = %err, "skipping unreadable document"),
        }
    }

    Ok(records)
}

pub fn insert_media(db: &Database, record: &MediaRecord) -> AppResult<()> {
    put(db, media_table(record.kind), &record.id, record)
}

/// Lists one media collection, newest first
pub fn list_media(db: &Database, kind: MediaKind) -> AppResult<Vec<MediaRecord>> {
    let mut records: Vec<MediaRecord> = scan(db, media_table(kind))?;
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(records)
}

pub fn get_media(db: &Database, kind: MediaKind, id: &str) -> AppResult<Option<MediaRecord>> {
    get(db, media_table(kind), id)
}

pub fn delete_media(db: &Database, kind: MediaKind, id: &str) -> AppResult<bool> {
    remove(db, media_table(kind), id)
}

/// Newest video with exactly this title
pub fn find_video_by_title(db: &Database, title: &str) -> AppResult<Option<MediaRecord>> {
    Ok(list_media(db, MediaKind::Video)?
        .into_iter()
        .find(|video| video.title == title))
}

pub fn insert_post(db: &Database, post: &Post) -> AppResult<()> {
    put(db, TABLE_POSTS, &post.id, post)
}

/// Lists all posts, newest first
pub fn list_posts(db: &Database) -> AppResult<Vec<Post>> {
    let mut posts: Vec<Post> = scan(db, TABLE_POSTS)?;
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(posts)
}

pub fn get_post(db: &Database, id: &str) -> AppResult<Option<Post>> {
    get(db, TABLE_POSTS, id)
}

/// Looks a post up by slug
///
/// Slugs are not unique; when several posts share one the newest wins.
pub fn find_post_by_slug(db: &Database, slug: &str) -> AppResult<Option<Post>> {
    Ok(list_posts(db)?.into_iter().find(|post| post.slug == slug))
}

pub fn delete_post(db: &Database, id: &str) -> AppResult<bool> {
    remove(db, TABLE_POSTS, id)
}

pub fn insert_session(db: &Database, token: &str, session: &Session) -> AppResult<()> {
    put(db, TABLE_SESSIONS, token, session)
}

/// Returns the live session for a token; expired sessions are removed
pub fn get_session(db: &Database, token: &str) -> AppResult<Option<Session>> {
    let Some(session) = get::<Session>(db, TABLE_SESSIONS, token)? else {
        return Ok(None);
    };

    if session.is_expired(Utc::now()) {
        remove(db, TABLE_SESSIONS, token)?;
        return Ok(None);
    }

    Ok(Some(session))
}

pub fn delete_session(db: &Database, token: &str) -> AppResult<bool> {
    remove(db, TABLE_SESSIONS, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::NamedTempFile;

    fn temp_db() -> (Database, NamedTempFile) {
        let file = NamedTempFile::new().unwrap();
        let db = init_db(file.path().to_str().unwrap()).unwrap();
        (db, file)
    }

    fn post(id: &str, slug: &str, secs: i64) -> Post {
        Post {
            id: id.to_string(),
            title: slug.to_string(),
            slug: slug.to_string(),
            content: "body".to_string(),
            youtube_url: None,
            cover_url: None,
            created_at: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn posts_list_newest_first() {
        let (db, _file) = temp_db();
        insert_post(&db, &post("a", "first", 10)).unwrap();
        insert_post(&db, &post("b", "second", 30)).unwrap();
        insert_post(&db, &post("c", "third", 20)).unwrap();

        let ids: Vec<String> = list_posts(&db).unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn slug_collision_returns_newest() {
        let (db, _file) = temp_db();
        insert_post(&db, &post("old", "same", 10)).unwrap();
        insert_post(&db, &post("new", "same", 20)).unwrap();

        assert_eq!(find_post_by_slug(&db, "same").unwrap().unwrap().id, "new");
        assert!(find_post_by_slug(&db, "missing").unwrap().is_none());
    }

    #[test]
    fn remove_reports_existence() {
        let (db, _file) = temp_db();
        insert_post(&db, &post("a", "x", 1)).unwrap();

        assert!(delete_post(&db, "a").unwrap());
        assert!(!delete_post(&db, "a").unwrap());
        assert!(get_post(&db, "a").unwrap().is_none());
    }

    #[test]
    fn expired_sessions_are_dropped() {
        let (db, _file) = temp_db();
        let now = Utc::now();
        let expired = Session {
            email: "admin@example.com".to_string(),
            created_at: now - Duration::hours(2),
            expires_at: now - Duration::hours(1),
        };
        insert_session(&db, "stale", &expired).unwrap();

        assert!(get_session(&db, "stale").unwrap().is_none());
        assert!(!delete_session(&db, "stale").unwrap());
    }
}
