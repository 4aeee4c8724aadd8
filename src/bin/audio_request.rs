//! Uploads one wav file and a text message twice: once with the blocking
//! client, once through a pooled session.
//!
//! Configured from the environment: `FANOUT_URL`, `FANOUT_AUDIO`,
//! `FANOUT_TEXT` and `FANOUT_AUTH_KEY`.

use std::env;
use std::io::IsTerminal;

use anyhow::{Context, Result};
use rusty_fanout::direct::{upload_blocking, upload_pooled, UploadRequest};
use rusty_fanout::ClientConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(std::io::stderr().is_terminal())
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let request = UploadRequest {
        url: env::var("FANOUT_URL").context("FANOUT_URL is not set")?,
        audio_path: env::var("FANOUT_AUDIO").context("FANOUT_AUDIO is not set")?.into(),
        text: env::var("FANOUT_TEXT").unwrap_or_else(|_| "test text message".to_string()),
        auth_key: env::var("FANOUT_AUTH_KEY").unwrap_or_else(|_| "blahblah".to_string()),
    };
    let config = ClientConfig::default();

    let body = upload_blocking(&request, &config)?;
    println!("{body}");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    let body = runtime.block_on(upload_pooled(&request, &config))?;
    println!("{body}");

    Ok(())
}
