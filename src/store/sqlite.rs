use super::types::FileEntry;
use anyhow::{Context, Result as AnyhowResult};
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Number of recently updated files listed on the index page.
pub const RECENT_FILES_LIMIT: u32 = 32;

const RECENT_FILES_QUERY: &str = "SELECT user.username, file.user_path, file.updated_at
  FROM file
  JOIN user
  ON file.user_id = user.id
  ORDER BY file.updated_at DESC
  LIMIT ?1";

const USERNAMES_QUERY: &str = "SELECT username FROM user";

/// Opens the shared SQLite store read-only.
///
/// The file is never created: a missing database is reported as an error instead of silently
/// producing an empty page.
///
/// # Arguments
///
/// * `path` - Path to the database file (e.g. "../flounder.db").
///
/// # Returns
///
/// * `Ok(Connection)` - An open read-only connection, closed when dropped.
/// * `Err(anyhow::Error)` - The file does not exist or cannot be opened.
///
/// # Examples
///
/// ```rust,no_run
/// use flounder_index::store::{fetch_usernames, open_store};
///
/// fn main() -> anyhow::Result<()> {
///   let conn = open_store("../flounder.db")?;
///   println!("{} users", fetch_usernames(&conn)?.len());
///   Ok(())
/// }
/// ```
pub fn open_store<P: AsRef<Path>>(path: P) -> AnyhowResult<Connection> {
  let path = path.as_ref();
  let conn = Connection::open_with_flags(
    path,
    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
  )
  .with_context(|| format!("Failed to open store at {}", path.display()))?;
  debug!("Opened store at {}", path.display());
  Ok(conn)
}

/// Fetches the most recently updated files, newest first.
///
/// Each row joins a file with the username of its owner. The stored `updated_at` column holds
/// Unix seconds and is decoded into a UTC timestamp; a value outside chrono's range fails the
/// whole query rather than being skipped.
///
/// # Arguments
///
/// * `conn` - Open store connection.
/// * `limit` - Maximum number of rows to return (the page uses [`RECENT_FILES_LIMIT`]).
/// * `now` - Reference time for each entry's relative age.
///
/// # Returns
///
/// * `Ok(Vec<FileEntry>)` - At most `limit` entries ordered by `updated_at` descending.
/// * `Err(anyhow::Error)` - The query failed or a row could not be decoded.
pub fn fetch_recent_files(conn: &Connection, limit: u32, now: DateTime<Utc>) -> AnyhowResult<Vec<FileEntry>> {
  let mut stmt = conn
    .prepare(RECENT_FILES_QUERY)
    .context("Failed to prepare recent files query")?;
  let rows = stmt
    .query_map([limit], |row| {
      Ok((
        row.get::<_, String>(0)?,
        row.get::<_, String>(1)?,
        row.get::<_, i64>(2)?,
      ))
    })
    .context("Failed to query recent files")?;

  let mut files = Vec::new();
  for row in rows {
    let (user_name, file_name, updated_secs) = row.context("Failed to read recent file row")?;
    let updated_at = DateTime::<Utc>::from_timestamp(updated_secs, 0)
      .with_context(|| format!("Invalid updated_at {} for {}/{}", updated_secs, user_name, file_name))?;
    files.push(FileEntry::new(user_name, file_name, updated_at, now));
  }

  debug!("Fetched {} recent file(s)", files.len());
  Ok(files)
}

/// Fetches every registered username.
///
/// No order is guaranteed; the page shuffles the list anyway.
///
/// # Arguments
///
/// * `conn` - Open store connection.
///
/// # Returns
///
/// * `Ok(Vec<String>)` - All usernames in the store.
/// * `Err(anyhow::Error)` - The query failed or a row could not be decoded.
pub fn fetch_usernames(conn: &Connection) -> AnyhowResult<Vec<String>> {
  let mut stmt = conn
    .prepare(USERNAMES_QUERY)
    .context("Failed to prepare usernames query")?;
  let rows = stmt
    .query_map([], |row| row.get::<_, String>(0))
    .context("Failed to query usernames")?;

  let mut users = Vec::new();
  for row in rows {
    users.push(row.context("Failed to read username row")?);
  }

  debug!("Fetched {} username(s)", users.len());
  Ok(users)
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;
  use chrono::TimeZone;
  use tempfile::tempdir;

  pub(crate) const SCHEMA: &str = "
    CREATE TABLE user (
      id INTEGER PRIMARY KEY,
      username TEXT NOT NULL UNIQUE
    );
    CREATE TABLE file (
      id INTEGER PRIMARY KEY,
      user_path TEXT NOT NULL,
      user_id INTEGER NOT NULL REFERENCES user(id),
      updated_at INTEGER NOT NULL
    );";

  /// Builds an in-memory store with `users` and one file per `(user index, path, updated_at)`.
  pub(crate) fn memory_store(users: &[&str], files: &[(usize, &str, i64)]) -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    for (i, user) in users.iter().enumerate() {
      conn
        .execute("INSERT INTO user (id, username) VALUES (?1, ?2)", (i as i64 + 1, user))
        .unwrap();
    }
    for (user, path, updated_at) in files {
      conn
        .execute(
          "INSERT INTO file (user_path, user_id, updated_at) VALUES (?1, ?2, ?3)",
          (path, *user as i64 + 1, updated_at),
        )
        .unwrap();
    }
    conn
  }

  fn now() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
  }

  /// Tests that files come back newest first and joined with their owner.
  #[test]
  fn test_fetch_recent_files_ordered_desc() {
    let conn = memory_store(
      &["alice", "bob"],
      &[
        (0, "index.gmi", 1_699_999_000),
        (1, "index.gmi", 1_699_999_900),
        (0, "notes/cats.gmi", 1_699_990_000),
      ],
    );

    let files = fetch_recent_files(&conn, RECENT_FILES_LIMIT, now()).unwrap();

    assert_eq!(files.len(), 3);
    assert_eq!(files[0].user_name, "bob");
    assert_eq!(files[0].file_name, "index.gmi");
    assert_eq!(files[0].time_ago, "1 minute ago");
    assert_eq!(files[1].user_name, "alice");
    assert_eq!(files[2].file_name, "notes/cats.gmi");
    assert_eq!(files[2].updated_at, Utc.timestamp_opt(1_699_990_000, 0).unwrap());
  }

  /// Tests that no more than the limit is returned, and that it keeps the newest rows.
  #[test]
  fn test_fetch_recent_files_respects_limit() {
    let paths: Vec<String> = (0..50).map(|i| format!("file{}.gmi", i)).collect();
    let files: Vec<(usize, &str, i64)> = paths
      .iter()
      .enumerate()
      .map(|(i, p)| (0, p.as_str(), 1_600_000_000 + i as i64))
      .collect();
    let conn = memory_store(&["alice"], &files);

    let fetched = fetch_recent_files(&conn, RECENT_FILES_LIMIT, now()).unwrap();

    assert_eq!(fetched.len(), 32);
    assert_eq!(fetched[0].file_name, "file49.gmi");
    assert!(fetched.windows(2).all(|w| w[0].updated_at >= w[1].updated_at));
  }

  #[test]
  fn test_fetch_from_empty_store() {
    let conn = memory_store(&[], &[]);
    assert!(fetch_recent_files(&conn, RECENT_FILES_LIMIT, now()).unwrap().is_empty());
    assert!(fetch_usernames(&conn).unwrap().is_empty());
  }

  #[test]
  fn test_fetch_usernames() {
    let conn = memory_store(&["alice", "bob", "carol"], &[]);
    let mut users = fetch_usernames(&conn).unwrap();
    users.sort();
    assert_eq!(users, vec!["alice", "bob", "carol"]);
  }

  /// A timestamp chrono cannot represent fails the query instead of being dropped.
  #[test]
  fn test_fetch_recent_files_invalid_timestamp() {
    let conn = memory_store(&["alice"], &[(0, "index.gmi", i64::MAX)]);
    assert!(fetch_recent_files(&conn, RECENT_FILES_LIMIT, now()).is_err());
  }

  /// A NULL username is a row-decoding error.
  #[test]
  fn test_fetch_usernames_decode_error() {
    let conn = Connection::open_in_memory().unwrap();
    conn
      .execute_batch("CREATE TABLE user (id INTEGER PRIMARY KEY, username TEXT); INSERT INTO user (username) VALUES (NULL);")
      .unwrap();
    assert!(fetch_usernames(&conn).is_err());
  }

  #[test]
  fn test_fetch_without_schema_fails() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(fetch_recent_files(&conn, RECENT_FILES_LIMIT, now()).is_err());
    assert!(fetch_usernames(&conn).is_err());
  }

  #[test]
  fn test_open_missing_store_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("flounder.db");
    assert!(open_store(&path).is_err());
    assert!(!path.exists());
  }
}
