//! # Assembling and Rendering the Index Page
//!
//! This module ties the pipeline together for a single request: it opens the store, fetches the
//! recently updated files and the usernames, shuffles the usernames with the caller's random
//! source, and renders the page template against the result.
//!
//! ## Usage
//!
//! The main entry point is [`render_index_page`], which takes an [`IndexRequest`] and a random
//! number generator and returns the rendered gemtext body. Pass a seeded `StdRng` for
//! reproducible output.
//!
//! ## Submodules
//!
//! - **builder**: Shuffling, page data assembly and the request itself.
//! - **types**: Defines the page data and request structures.

mod builder;
mod types;

pub use builder::{build_page_data, render_index_page, shuffle_users};
pub use types::{IndexRequest, PageData, DEFAULT_DOMAIN};
