//! Uploads every paired `.wav`/`.txt` in a directory as one concurrent batch.
//!
//! Configured from the environment: `FANOUT_URL`, `FANOUT_DIR`,
//! `FANOUT_METHOD` (default `post`), `FANOUT_CONNECTION_LIMIT` (default `0`,
//! unlimited) and `FANOUT_AUTH_KEY`.

use std::env;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use rusty_fanout::{fetch_requests, AudioUploadTemplate, TemplateConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let url = env::var("FANOUT_URL").context("FANOUT_URL is not set")?;
    let dir = env::var("FANOUT_DIR").context("FANOUT_DIR is not set")?;
    let method = env::var("FANOUT_METHOD").unwrap_or_else(|_| "post".to_string());
    let connection_limit = match env::var("FANOUT_CONNECTION_LIMIT") {
        Ok(v) => v.parse().context("FANOUT_CONNECTION_LIMIT is not a non-negative integer")?,
        Err(_) => 0,
    };

    let config = TemplateConfig::new(&url, &method, connection_limit)?;
    let mut template = AudioUploadTemplate::with_config(config, dir);
    if let Ok(key) = env::var("FANOUT_AUTH_KEY") {
        template = template.with_header("auth-key", &key);
    }

    for body in fetch_requests(&template)? {
        println!("{body}");
    }
    Ok(())
}
