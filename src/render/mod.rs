//! # Rendering the Index Page Template
//!
//! This module loads the gemtext template that lays out the index page and renders it against the
//! assembled [`PageData`](crate::page::PageData). Templates use Jinja syntax via `minijinja`, with
//! block tags trimmed so `{% for %}` lines do not leave blank lines in the gemtext output.
//!
//! Templates see three top-level values:
//!
//! - `Domain`: the public domain of the service.
//! - `Files`: recently updated files, each with `UserName`, `FileName`, `UpdatedAt` and `TimeAgo`.
//! - `Users`: every username, in random order.
//!
//! ## Submodules
//!
//! - **template**: Loading and rendering of a single template resource.

mod template;

pub use template::PageTemplate;
