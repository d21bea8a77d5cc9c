use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::info;

static IPV4_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Returns true for dotted-quad literals. Octets are not range checked, so
/// `999.999.999.999` counts as an address too.
pub fn is_ip_address(token: &str) -> bool {
    IPV4_PATTERN
        .get_or_init(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("valid IPv4 pattern"))
        .is_match(token)
}

/// Reads every line of `path`, trimmed. Blank lines are kept as empty tokens.
pub fn load_tokens(path: &Path) -> Result<Vec<String>> {
    let start_time = Instant::now();
    info!(action = "start", component = "input_loading", file_path = ?path, "Loading lookup tokens");

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {:?}", path))?;
    let tokens: Vec<String> = content.lines().map(|line| line.trim().to_string()).collect();

    info!(
        action = "complete",
        component = "input_loading",
        token_count = tokens.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Loaded lookup tokens"
    );
    Ok(tokens)
}
