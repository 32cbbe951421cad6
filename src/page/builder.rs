use super::types::{IndexRequest, PageData};
use crate::render::PageTemplate;
use crate::store::{fetch_recent_files, fetch_usernames, open_store, RECENT_FILES_LIMIT};
use anyhow::{Context, Result as AnyhowResult};
use chrono::{DateTime, Utc};
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;
use rusqlite::Connection;

/// Shuffles usernames in place with a uniformly random permutation.
///
/// # Examples
///
/// ```rust
/// use flounder_index::page::shuffle_users;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut users = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
/// shuffle_users(&mut users, &mut StdRng::seed_from_u64(7));
/// users.sort();
/// assert_eq!(users, ["alice", "bob", "carol"]);
/// ```
pub fn shuffle_users<R: Rng + ?Sized>(users: &mut [String], rng: &mut R) {
    users.shuffle(rng);
}

/// Queries the store and assembles the data for the index template.
///
/// # Arguments
///
/// * `conn` - Open store connection.
/// * `domain` - Public domain exposed to the template.
/// * `now` - Time of the request, for relative file ages.
/// * `rng` - Random source for the username order.
///
/// # Returns
///
/// * `Ok(PageData)` - Up to [`RECENT_FILES_LIMIT`] files, newest first, and all usernames shuffled.
/// * `Err(anyhow::Error)` - Either query failed.
pub fn build_page_data<R: Rng + ?Sized>(
    conn: &Connection,
    domain: &str,
    now: DateTime<Utc>,
    rng: &mut R,
) -> AnyhowResult<PageData> {
    let files = fetch_recent_files(conn, RECENT_FILES_LIMIT, now).context("Failed to fetch recent files")?;
    let mut users = fetch_usernames(conn).context("Failed to fetch usernames")?;
    shuffle_users(&mut users, rng);

    Ok(PageData {
        domain: domain.to_string(),
        files,
        users,
    })
}

/// Renders the index page for one request.
///
/// The store connection lives only for the duration of the queries and is closed before the
/// template is rendered, whether or not the queries succeed. Nothing is written anywhere; the
/// caller decides how to turn the result into a response.
///
/// # Arguments
///
/// * `request` - Store path, template path, domain and request time.
/// * `rng` - Random source for the username order.
///
/// # Returns
///
/// * `Ok(String)` - The rendered gemtext body, line endings not yet normalized.
/// * `Err(anyhow::Error)` - The store could not be opened or queried, or the template failed.
///
/// # Examples
///
/// ```rust,no_run
/// use chrono::Utc;
/// use flounder_index::page::{render_index_page, IndexRequest, DEFAULT_DOMAIN};
///
/// fn main() -> anyhow::Result<()> {
///     let request = IndexRequest {
///         store_path: "../flounder.db".into(),
///         template_path: "index.gmi".into(),
///         domain: DEFAULT_DOMAIN.to_string(),
///         now: Utc::now(),
///     };
///     let body = render_index_page(&request, &mut rand::thread_rng())?;
///     print!("{}", body);
///     Ok(())
/// }
/// ```
pub fn render_index_page<R: Rng + ?Sized>(request: &IndexRequest, rng: &mut R) -> AnyhowResult<String> {
    let conn = open_store(&request.store_path)?;
    let data = build_page_data(&conn, &request.domain, request.now, rng);
    drop(conn);
    let data = data?;

    let template = PageTemplate::load(&request.template_path)?;
    let body = template.render(&data)?;
    info!(
        "Rendered {} with {} file(s) and {} user(s)",
        template.name(),
        data.files.len(),
        data.users.len()
    );
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory_store;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn usernames(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("user{}", i)).collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    /// Tests that shuffling never drops or duplicates a username.
    #[test]
    fn test_shuffle_preserves_membership() {
        let original = usernames(25);
        let mut shuffled = original.clone();
        shuffle_users(&mut shuffled, &mut StdRng::seed_from_u64(42));

        assert_eq!(shuffled.len(), original.len());
        let mut sorted = shuffled.clone();
        sorted.sort();
        let mut expected = original.clone();
        expected.sort();
        assert_eq!(sorted, expected);
    }

    #[test]
    fn test_shuffle_is_reproducible_with_seed() {
        let mut first = usernames(20);
        let mut second = usernames(20);
        shuffle_users(&mut first, &mut StdRng::seed_from_u64(9));
        shuffle_users(&mut second, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }

    /// Across several seeds the order should not always match the stored order.
    #[test]
    fn test_shuffle_changes_order() {
        let original = usernames(20);
        let orders: Vec<Vec<String>> = (0..8)
            .map(|seed| {
                let mut users = original.clone();
                shuffle_users(&mut users, &mut StdRng::seed_from_u64(seed));
                users
            })
            .collect();

        assert!(orders.iter().any(|order| *order != original));
        assert!(orders.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut empty: Vec<String> = Vec::new();
        shuffle_users(&mut empty, &mut StdRng::seed_from_u64(1));
        assert!(empty.is_empty());

        let mut single = vec!["alice".to_string()];
        shuffle_users(&mut single, &mut StdRng::seed_from_u64(1));
        assert_eq!(single, ["alice"]);
    }

    #[test]
    fn test_build_page_data() {
        let conn = memory_store(
            &["alice", "bob", "carol"],
            &[(0, "index.gmi", 1_699_999_000), (2, "log.gmi", 1_699_999_500)],
        );

        let data = build_page_data(&conn, "example.org", now(), &mut StdRng::seed_from_u64(3)).unwrap();

        assert_eq!(data.domain, "example.org");
        assert_eq!(data.files.len(), 2);
        assert_eq!(data.files[0].user_name, "carol");
        assert_eq!(data.files[1].user_name, "alice");
        let mut users = data.users.clone();
        users.sort();
        assert_eq!(users, ["alice", "bob", "carol"]);
    }

    /// Tests that page data serializes with the keys templates rely on.
    #[test]
    fn test_page_data_field_names() {
        let conn = memory_store(&["alice"], &[(0, "index.gmi", 1_699_999_000)]);
        let data = build_page_data(&conn, "flounder.online", now(), &mut StdRng::seed_from_u64(0)).unwrap();

        let value = serde_json::to_value(&data).unwrap();

        assert_eq!(value["Domain"], "flounder.online");
        assert_eq!(value["Users"][0], "alice");
        assert_eq!(value["Files"][0]["UserName"], "alice");
        assert_eq!(value["Files"][0]["FileName"], "index.gmi");
        assert_eq!(value["Files"][0]["TimeAgo"], "16 minutes ago");
        assert!(value["Files"][0]["UpdatedAt"].is_string());
    }
}
