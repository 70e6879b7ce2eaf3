//! Configuration validation rules.

use super::schema::{Config, StorageBackend};

/// Validate configuration and return aggregated validation errors.
pub fn validate_config(config: &Config) -> crate::Result<()> {
    let mut errors = Vec::new();

    let base_url = config.api.base_url.trim();
    if base_url.is_empty() {
        errors.push("api.base_url must not be empty".to_string());
    } else if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        errors.push("api.base_url must start with http:// or https://".to_string());
    }

    if config.storage.backend == StorageBackend::File && config.storage.path.trim().is_empty() {
        errors.push("storage.path is required when the file backend is used".to_string());
    }

    if !config.routes.login_route.starts_with('/') {
        errors.push("routes.login_route must start with '/'".to_string());
    }

    if !matches!(
        config.logging.format.to_ascii_lowercase().as_str(),
        "text" | "json"
    ) {
        errors.push("logging.format must be one of: text, json".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(crate::Error::Validation(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_defaults() {
        validate_config(&Config::default()).unwrap();
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let mut config = Config::default();
        config.api.base_url = "ftp://127.0.0.1".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("api.base_url"));
    }

    #[test]
    fn test_validate_aggregates_errors() {
        let mut config = Config::default();
        config.storage.path = "  ".to_string();
        config.routes.login_route = "userlogin".to_string();

        let err = validate_config(&config).unwrap_err().to_string();
        assert!(err.contains("storage.path"));
        assert!(err.contains("routes.login_route"));
    }

    #[test]
    fn test_memory_backend_needs_no_path() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Memory;
        config.storage.path = String::new();
        validate_config(&config).unwrap();
    }
}
