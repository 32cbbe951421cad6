//! # Reading Recent Files and Users from the Shared Store
//!
//! This module provides read-only access to the SQLite database shared with the rest of the
//! publishing service. It opens the database file without ever creating or writing to it, and
//! runs the two queries the index page needs: the most recently updated files joined with their
//! owner's username, and the full list of usernames.
//!
//! ## Usage
//!
//! Open a connection with [`open_store`], then pass it by reference to [`fetch_recent_files`] and
//! [`fetch_usernames`]. The connection is closed when it is dropped.
//!
//! ## Submodules
//!
//! - **sqlite**: Connection setup and the SQL queries.
//! - **types**: Defines the rows returned by the queries.

mod sqlite;
mod types;

pub use sqlite::{fetch_recent_files, fetch_usernames, open_store, RECENT_FILES_LIMIT};
pub use types::FileEntry;

#[cfg(test)]
pub(crate) use sqlite::tests::memory_store;
