use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Source URL overrides, when present, must be absolute http(s) URLs
/// - The HTTP timeout must be non-zero
/// - If a log file path is provided, it cannot be empty and its parent
///   directory must exist or be creatable
pub fn validate_config(
    source_url_overrides: &[&Option<String>],
    http_timeout_seconds: u64,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    for url in source_url_overrides.iter().filter_map(|url| url.as_ref()) {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(AppError::config_error(format!(
                "Source URL override must be an absolute http(s) URL: '{url}'"
            )));
        }
    }

    if http_timeout_seconds == 0 {
        return Err(AppError::config_error("HTTP timeout cannot be zero"));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        // Check if parent directory exists or can be created
        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
