use std::path::Path;

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("dee_fixtures")
        .join("config.toml")
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("dee_fixtures")
        .join("logs")
        .to_string_lossy()
        .to_string()
}

/// Returns the default path of the JSON fixture store.
///
/// Lives in the platform data directory (e.g., ~/.local/share on Linux);
/// falls back to the current directory when unavailable.
pub fn get_default_store_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join("dee_fixtures")
        .join("fixtures.json")
        .to_string_lossy()
        .to_string()
}
