use crate::store::FileEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Public domain of the hosting service, used to build links to user sites.
pub const DEFAULT_DOMAIN: &str = "flounder.online";

/// Everything the index template can see.
///
/// Serialized with PascalCase keys: `Domain`, `Files` and `Users`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PageData {
    /// Public domain of the service (e.g. "flounder.online").
    pub domain: String,
    /// Recently updated files, newest first.
    pub files: Vec<FileEntry>,
    /// All usernames, shuffled.
    pub users: Vec<String>,
}

/// Inputs for rendering the index page once.
#[derive(Debug, Clone)]
pub struct IndexRequest {
    /// Path to the SQLite store.
    pub store_path: PathBuf,
    /// Path to the gemtext template.
    pub template_path: PathBuf,
    /// Domain exposed to the template.
    pub domain: String,
    /// Time of the request, used for relative file ages.
    pub now: DateTime<Utc>,
}
