//! Environment-driven configuration
//!
//! Every setting is read from the process environment (a `.env` file is
//! loaded first by `main`). Missing or unparsable values fall back to the
//! defaults documented on each field.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Longest accepted session lifetime: one year
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;

/// Runtime configuration for the server
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port (`PORT`, default 8080)
    pub port: u16,

    /// Path of the redb file (`DATABASE_URL`, default "data.db")
    pub database_url: String,

    /// Root directory of the object store (`STORAGE_DIR`, default "storage")
    pub storage_dir: PathBuf,

    /// Base used to build public download URLs (`PUBLIC_URL`)
    pub public_url: String,

    /// Admin identity allowed to sign in (`ADMIN_EMAIL`)
    pub admin_email: Option<String>,

    /// Argon2 PHC string for the admin password (`ADMIN_PASSWORD_HASH`)
    pub admin_password_hash: Option<String>,

    /// Lifetime of a bearer token in hours (`SESSION_TTL_HOURS`, default 24)
    pub session_ttl_hours: i64,

    /// Cap on request bodies, uploads included (`MAX_UPLOAD_BYTES`, default 500 MiB)
    pub max_upload_bytes: usize,

    pub site: SiteConfig,
}

/// Static copy for the public hero/about/footer sections
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub name: String,
    pub tagline: String,
    pub contact_email: String,
    pub about: String,
    /// Title of the video whose URL is used as the hero showreel
    pub showreel_title: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Christian Ward Films".to_string(),
            tagline: "Visuals. Audio. Innovation.".to_string(),
            contact_email: "contact@christianward.net".to_string(),
            about: "Film, motion and sound for brands that want to be felt, not just seen."
                .to_string(),
            showreel_title: "Showreel 2026".to_string(),
        }
    }
}

impl Config {
    /// Builds the configuration from environment variables
    pub fn from_env() -> Self {
        let port = parse_var("PORT", 8080u16);
        let defaults = SiteConfig::default();

        Self {
            port,
            database_url: var_or("DATABASE_URL", "data.db"),
            storage_dir: PathBuf::from(var_or("STORAGE_DIR", "storage")),
            public_url: var_or("PUBLIC_URL", &format!("http://localhost:{}", port)),
            admin_email: non_empty_var("ADMIN_EMAIL"),
            admin_password_hash: non_empty_var("ADMIN_PASSWORD_HASH"),
            session_ttl_hours: session_ttl(parse_var("SESSION_TTL_HOURS", 24)),
            max_upload_bytes: parse_var("MAX_UPLOAD_BYTES", 500 * 1024 * 1024),
            site: SiteConfig {
                name: var_or("SITE_NAME", &defaults.name),
                tagline: var_or("SITE_TAGLINE", &defaults.tagline),
                contact_email: var_or("CONTACT_EMAIL", &defaults.contact_email),
                about: var_or("ABOUT_TEXT", &defaults.about),
                showreel_title: var_or("SHOWREEL_TITLE", &defaults.showreel_title),
            },
        }
    }

    /// Configuration used by tests and local tooling: everything rooted at
    /// the given paths, no admin configured.
    pub fn local(database_url: &str, storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 8080,
            database_url: database_url.to_string(),
            storage_dir: storage_dir.into(),
            public_url: "http://localhost:8080".to_string(),
            admin_email: None,
            admin_password_hash: None,
            session_ttl_hours: 24,
            max_upload_bytes: 500 * 1024 * 1024,
            site: SiteConfig::default(),
        }
    }
}

/// Clamps a configured session lifetime to `1..=MAX_SESSION_TTL_HOURS`
pub fn session_ttl(hours: i64) -> i64 {
    let clamped = hours.clamp(1, MAX_SESSION_TTL_HOURS);
    if clamped != hours {
        tracing::warn!(requested = hours, using = clamped, "SESSION_TTL_HOURS out of range");
    }
    clamped
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
