//! # Utility Functions for the Index Page
//!
//! This module provides small helpers shared by the pipeline stages that do not
//! belong to any single stage.
//!
//! ## Submodules
//!
//! - **time_ago**: Formats a timestamp as a human-readable relative time.

mod time_ago;

pub use time_ago::rendered_time_ago;
