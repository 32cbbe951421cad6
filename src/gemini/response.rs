use super::types::Status;
use anyhow::{Context, Result as AnyhowResult};
use log::error;
use std::io::Write;

/// Line terminator required by the protocol.
pub const CRLF: &str = "\r\n";

/// Media type of the rendered index page.
pub const GEMTEXT_MIME: &str = "text/gemini";

/// Re-terminates every line of `body` with `\r\n`.
///
/// Lines are split on `\n` and a trailing `\r` is dropped, so bare `\n` and `\r\n` input
/// normalize the same way. The last line is terminated even if the body did not end with a
/// newline, and a trailing newline does not produce an extra empty line.
///
/// # Examples
///
/// ```rust
/// use flounder_index::gemini::normalize_line_endings;
///
/// assert_eq!(normalize_line_endings("# Hi\nthere"), "# Hi\r\nthere\r\n");
/// assert_eq!(normalize_line_endings("a\r\n\nb\n"), "a\r\n\r\nb\r\n");
/// assert_eq!(normalize_line_endings(""), "");
/// ```
pub fn normalize_line_endings(body: &str) -> String {
    let mut normalized = String::with_capacity(body.len() + body.len() / 16 + CRLF.len());
    for line in body.lines() {
        normalized.push_str(line);
        normalized.push_str(CRLF);
    }
    normalized
}

/// Writes a `20` response: the status line with `mime`, then the normalized body.
///
/// # Arguments
///
/// * `out` - Where the response goes, usually stdout.
/// * `mime` - Media type for the status line (e.g. "text/gemini").
/// * `body` - Rendered body, in any line ending style.
pub fn write_success<W: Write + ?Sized>(out: &mut W, mime: &str, body: &str) -> AnyhowResult<()> {
    write!(out, "{} {}{}", Status::Success, mime, CRLF).context("Failed to write status line")?;
    out.write_all(normalize_line_endings(body).as_bytes())
        .context("Failed to write response body")?;
    Ok(())
}

/// Writes the bare temporary failure line, `40\r\n`.
pub fn write_failure<W: Write + ?Sized>(out: &mut W) -> AnyhowResult<()> {
    write!(out, "{}{}", Status::TemporaryFailure, CRLF).context("Failed to write failure status")?;
    Ok(())
}

/// Writes the response for the outcome of a request and flushes `out`.
///
/// An `Ok` body becomes a `20 text/gemini` response. Any error becomes exactly `40\r\n`; its cause
/// chain is logged at error level and never reaches the client.
///
/// # Arguments
///
/// * `out` - Where the response goes, usually stdout.
/// * `outcome` - The rendered body, or the error that stopped the request.
///
/// # Returns
///
/// * `Ok(Status)` - The status that was written.
/// * `Err(anyhow::Error)` - `out` itself could not be written.
///
/// # Examples
///
/// ```rust
/// use flounder_index::gemini::{respond, Status};
///
/// let mut out: Vec<u8> = Vec::new();
/// let status = respond(&mut out, Err(anyhow::anyhow!("store is gone"))).unwrap();
/// assert_eq!(status, Status::TemporaryFailure);
/// assert_eq!(out, b"40\r\n");
/// ```
pub fn respond<W: Write + ?Sized>(out: &mut W, outcome: AnyhowResult<String>) -> AnyhowResult<Status> {
    let status = match outcome {
        Ok(body) => {
            write_success(out, GEMTEXT_MIME, &body)?;
            Status::Success
        }
        Err(e) => {
            error!("Request failed: {:#}", e);
            write_failure(out)?;
            Status::TemporaryFailure
        }
    };
    out.flush().context("Failed to flush response")?;
    Ok(status)
}
