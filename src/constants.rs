//! Central Configuration Constants
//!
//! Single source of truth for environment variable names and path defaults.

use std::path::PathBuf;

/// Env var pointing at a JSON scoring rules file
pub const RULES_PATH_ENV: &str = "IOC_FUSION_RULES";

/// Env var pointing at the SQLite history database
pub const HISTORY_DB_ENV: &str = "IOC_FUSION_HISTORY_DB";

/// App data directory name
pub const APP_DIR_NAME: &str = "ioc-fusion";

/// Default history database file name
pub const HISTORY_DB_FILE: &str = "history.db";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the rules file path from environment, if set
pub fn get_rules_path() -> Option<PathBuf> {
    std::env::var(RULES_PATH_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}

/// Get history database path from environment or use the app data directory
pub fn get_history_db_path() -> PathBuf {
    std::env::var(HISTORY_DB_ENV)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR_NAME)
                .join(HISTORY_DB_FILE)
        })
}
