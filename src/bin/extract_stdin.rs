//! Simple CLI that reads HTML from stdin and outputs the distilled result as JSON.
//!
//! Usage: `extract_stdin [--text] [PAGE_URL] < page.html`
//!
//! Diagnostics go to stderr, filtered by `RUST_LOG` (e.g. `RUST_LOG=dom_distiller=debug`).

use std::io::{self, Read};
use std::process::ExitCode;

use dom_distiller::{distill_with_options, Options, Result};
use tracing_subscriber::EnvFilter;

fn options_from_args() -> Result<Options> {
    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        if arg == "--text" {
            options.extract_text_only = true;
        } else {
            options = Options {
                extract_text_only: options.extract_text_only,
                ..Options::with_url(&arg)?
            };
        }
    }
    Ok(options)
}

fn run() -> Result<String> {
    let options = options_from_args()?;

    let mut html = String::new();
    io::stdin().read_to_string(&mut html)?;

    let result = distill_with_options(&html, &options)?;
    Ok(serde_json::to_string_pretty(&result).unwrap_or_default())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("extract_stdin: {err}");
            ExitCode::FAILURE
        }
    }
}
