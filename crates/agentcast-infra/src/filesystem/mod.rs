//! Data directory layout for agentcast.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "AGENTCAST_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `AGENTCAST_DATA_DIR` environment variable
/// 2. `~/.agentcast`
/// 3. `.agentcast` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".agentcast");
    }

    PathBuf::from(".agentcast")
}
