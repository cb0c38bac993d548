//! Centralized path management for the Feishu tools
//!
//! Data files (the bot log) and the configuration file live in separate
//! platform directories, both under a `feishu-tools` folder.

use std::path::PathBuf;

/// The name of the application directory used across all platforms
const APP_DIR: &str = "feishu-tools";

/// The name of the duty bot log file
const LOG_FILE: &str = "feishu-duty.log";

/// The name of the configuration file
const CONFIG_FILE: &str = "config.toml";

/// Returns the base data directory for the application
///
/// - Linux: `~/.local/share/feishu-tools`
/// - macOS: `~/Library/Application Support/feishu-tools`
/// - Windows: `%APPDATA%/feishu-tools`
///
/// Falls back to `.feishu-tools` in the current directory.
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".feishu-tools"))
}

/// Default location of the duty bot log file
pub fn get_log_path() -> PathBuf {
    get_data_dir().join(LOG_FILE)
}

/// Returns the configuration directory
///
/// `XDG_CONFIG_HOME` wins on Unix-like systems, otherwise the platform
/// config directory is used.
pub fn get_config_dir() -> PathBuf {
    #[cfg(not(target_os = "windows"))]
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join(APP_DIR);
    }

    dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".feishu-tools"))
}

/// Returns the path to the configuration file
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
