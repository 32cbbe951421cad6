use crate::utils::rendered_time_ago;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A recently updated file together with the username of its owner.
///
/// Serialized for templates with PascalCase keys: `UserName`, `FileName`, `UpdatedAt` and
/// `TimeAgo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileEntry {
    /// Username of the account that owns the file.
    pub user_name: String,
    /// Path of the file relative to the owner's site (e.g. "index.gmi").
    pub file_name: String,
    /// When the file was last updated, rendered as RFC 3339 in templates.
    pub updated_at: DateTime<Utc>,
    /// Relative age of the last update at request time (e.g. "5 minutes ago").
    pub time_ago: String,
}

impl FileEntry {
    /// Builds an entry, computing its relative age against `now`.
    pub fn new(user_name: String, file_name: String, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            time_ago: rendered_time_ago(updated_at, now),
            user_name,
            file_name,
            updated_at,
        }
    }
}
