//! Flounder Index: Render the Gemini Home Page from the Shared Store
//!
//! This program is a CGI script run once per request by the gemini server. It reads the most
//! recently updated files and the list of users from the service's SQLite database, renders them
//! through a gemtext template and writes a gemini response to stdout.
//!
//! ## Design Overview
//! - **Store**: Opens the database read-only and runs two queries via the `store` module.
//! - **Page**: Shuffles the usernames and assembles the template data via the `page` module.
//! - **Render**: Fills in the gemtext template via the `render` module.
//! - **Respond**: Writes `20 text/gemini` and a CRLF-terminated body, or a bare `40`, via the
//!   `gemini` module.
//!
//! ## Dependencies
//! - **`rusqlite`**: For reading the SQLite store.
//! - **`minijinja`**: For rendering the gemtext template.
//! - **`rand`**: For shuffling the user directory.
//! - **`log` and `env_logger`**: For logging to stderr, which never mixes with the response.
//! - **`clap`**: For overriding the defaults through arguments or environment variables.
//! - **`chrono`**: Handles stored timestamps and relative file ages.
//! - **`anyhow`**: For error propagation with context.
//!
//! ## Usage
//! 1. Point the gemini server's CGI directory at the binary. With no configuration it reads
//!    `../flounder.db` and `index.gmi` relative to its working directory.
//! 2. Override any default with arguments or environment variables:
//!    ```sh
//!    FLOUNDER_DB=/srv/flounder/flounder.db INDEX_TEMPLATE=/srv/flounder/templates/index.gmi flounder_index
//!    flounder_index --db-path ./flounder.db --template templates/index.gmi --seed 42
//!    ```
//! 3. Logs are written to stderr, controlled by the `RUST_LOG` environment variable:
//!    ```sh
//!    export RUST_LOG=info
//!    ```
//!
//! ## Notes
//! - Every failure, including invalid configuration, is answered with `40` and no detail. The cause
//!   is only logged.

use chrono::Utc;
use clap::error::ErrorKind;
use clap::Parser;
use flounder_index::gemini::respond;
use flounder_index::page::{render_index_page, IndexRequest, DEFAULT_DOMAIN};
use log::{debug, error};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command-line arguments for configuring the index page.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
  /// Path to the SQLite database shared with the rest of the service.
  #[clap(long, env = "FLOUNDER_DB", default_value = "../flounder.db")]
  db_path: PathBuf,

  /// Path to the gemtext template for the page.
  #[clap(long, env = "INDEX_TEMPLATE", default_value = "index.gmi")]
  template: PathBuf,

  /// Public domain of the service, used in links to user sites.
  #[clap(long, env = "FLOUNDER_DOMAIN", default_value = DEFAULT_DOMAIN)]
  domain: String,

  /// Seed for the user directory order. A fresh random order is used when unset.
  #[clap(long, env = "INDEX_SEED")]
  seed: Option<u64>,

  /// Query-string words some CGI servers pass as arguments. Ignored.
  #[clap(hide = true)]
  query_words: Vec<String>,
}

/// Renders the page for the configured request.
///
/// This function:
/// 1. Parses configuration from arguments and environment variables.
/// 2. Seeds the random source for the user directory.
/// 3. Opens the store, queries it and renders the template.
///
/// # Returns
/// - `Ok(String)` with the rendered body.
/// - `Err(anyhow::Error)` if configuration, the store or the template fails.
fn run() -> anyhow::Result<String> {
  let args = match Args::try_parse() {
    Ok(args) => args,
    Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
    Err(e) => return Err(anyhow::Error::new(e).context("Invalid configuration")),
  };
  debug!("Configuration: {:?}", args);

  let mut rng = match args.seed {
    Some(seed) => StdRng::seed_from_u64(seed),
    None => StdRng::from_entropy(),
  };

  let request = IndexRequest {
    store_path: args.db_path,
    template_path: args.template,
    domain: args.domain,
    now: Utc::now(),
  };
  render_index_page(&request, &mut rng)
}

fn main() -> ExitCode {
  // Initialize logging
  env_logger::init();

  let stdout = io::stdout();
  let mut out = stdout.lock();
  match respond(&mut out, run()) {
    Ok(_) => ExitCode::SUCCESS,
    Err(e) => {
      error!("Failed to write response: {:#}", e);
      ExitCode::FAILURE
    }
  }
}
