//! # Writing Gemini Responses
//!
//! This module turns the outcome of a request into bytes on the wire. A gemini response is a
//! status line (`<two-digit status> <meta>\r\n`) followed, on success, by a body whose lines are
//! all terminated with `\r\n`. Only two statuses are ever produced: `20 text/gemini` for a
//! rendered page and a bare `40` when anything went wrong.
//!
//! ## Usage
//!
//! [`respond`] is the boundary between the pipeline and the client: it writes the success
//! response for an `Ok` body and the failure line for any error, logging the cause to stderr.
//!
//! ## Submodules
//!
//! - **response**: Status lines, line ending normalization and the response boundary.
//! - **types**: Defines the response statuses.

mod response;
mod types;

pub use response::{normalize_line_endings, respond, write_failure, write_success, CRLF, GEMTEXT_MIME};
pub use types::Status;
