use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::RwLock;
use std::time::SystemTime;
use once_cell::sync::Lazy;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde_json::Value;

use crate::utils::format_datetime;

#[derive(Clone, Debug, PartialEq)]
enum DebugTarget {
    Console,
    File(String),
}

#[derive(Clone, Debug)]
struct DebugConfig {
    enabled: bool,
    target: DebugTarget,
}

static DEBUG_CONFIG: Lazy<RwLock<DebugConfig>> = Lazy::new(|| {
    RwLock::new(DebugConfig { enabled: false, target: DebugTarget::Console })
});

fn current() -> DebugConfig {
    DEBUG_CONFIG.read().unwrap_or_else(|e| e.into_inner()).clone()
}

/// Turns the per-response dump on or off.
///
/// `target` is `"console"` (or empty / `None`) to emit through `tracing`, a
/// file path to append to, or a directory in which `debug.log` is created.
pub fn set_debug(enabled: bool, target: Option<&str>) {
    let mut cfg = DEBUG_CONFIG.write().unwrap_or_else(|e| e.into_inner());
    cfg.enabled = enabled;
    cfg.target = match target {
        Some(t) if t.eq_ignore_ascii_case("console") || t.is_empty() => DebugTarget::Console,
        Some(t) => {
            let path = Path::new(t);
            if path.is_dir() {
                DebugTarget::File(path.join("debug.log").to_string_lossy().to_string())
            } else {
                DebugTarget::File(t.to_string())
            }
        }
        None => DebugTarget::Console,
    };
}

pub fn is_debug() -> bool {
    current().enabled
}

pub(crate) fn debug_log(
    method: &str,
    url: &str,
    status: StatusCode,
    headers: &HeaderMap,
    body: &Value,
    started: SystemTime,
) {
    let cfg = current();
    if !cfg.enabled {
        return;
    }

    let mut msg = format!(
        "\n==== [{}] ====\nMethod: {}\nURL: {}\nStatus: {}\n",
        format_datetime(started), method, url, status
    );
    msg.push_str("Headers:\n");
    for (key, value) in headers.iter() {
        msg.push_str(&format!("  {}: {:?}\n", key, value));
    }
    msg.push_str(&format!(
        "Response: {}\nFinished: {}\n",
        body,
        format_datetime(SystemTime::now())
    ));

    match &cfg.target {
        DebugTarget::Console => tracing::info!(target: "rusty_fanout::debug", "{}", msg),
        DebugTarget::File(path) => {
            let written = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .and_then(|mut f| writeln!(f, "{}", msg));
            if let Err(e) = written {
                tracing::warn!(path = %path, err = %e, "Failed to write debug log");
            }
        }
    }
}
