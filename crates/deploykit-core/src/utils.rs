//! Utility helpers — secret masking and path resolution.

use std::path::PathBuf;

/// Mask a secret for display, keeping at most the first four characters.
///
/// Empty secrets render as `(unset)` so operators can tell "missing" from
/// "present but hidden".
pub fn mask_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "(unset)".to_string();
    }
    let count = secret.chars().count();
    if count <= 8 {
        return "*".repeat(count);
    }
    let head: String = secret.chars().take(4).collect();
    format!("{head}…({count} chars)")
}

/// Default config file name, looked up relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "deploykit.json";

/// Default config path (`./deploykit.json`).
pub fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_FILE)
}

/// Upper-case a network name for use inside an env var key
/// (`bscTest` → `BSCTEST`, `my-net` → `MY_NET`).
pub fn env_key_segment(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}
