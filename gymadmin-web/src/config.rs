//! Console configuration
//!
//! Values are baked in at build time from `GYMADMIN_*` environment variables,
//! since the console runs in a browser with no process environment.

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_LOG_LEVEL: &str = "info";

/// Console configuration for the backend endpoint and session behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Base URL of the enrollment backend, without a trailing slash.
    pub api_base_url: String,

    /// Tracing filter directive for the browser console.
    pub log_level: String,

    /// Log the user out when an authenticated call comes back `401`.
    pub logout_on_unauthorized: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: normalize_base_url(
                option_env!("GYMADMIN_API_BASE_URL").unwrap_or(DEFAULT_API_BASE_URL),
            ),
            log_level: option_env!("GYMADMIN_LOG_LEVEL")
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
            logout_on_unauthorized: option_env!("GYMADMIN_LOGOUT_ON_UNAUTHORIZED")
                .is_some_and(parse_flag),
        }
    }
}

impl ConsoleConfig {
    /// Create a new console configuration from the build environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the console at another backend.
    #[must_use]
    pub fn with_api_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(base_url);
        self
    }

    /// Override the tracing filter.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable or disable the forced logout on `401` responses.
    #[must_use]
    pub fn with_logout_on_unauthorized(mut self, enabled: bool) -> Self {
        self.logout_on_unauthorized = enabled;
        self
    }

    /// Resolve a request target: absolute URLs pass through, paths are joined
    /// onto [`ConsoleConfig::api_base_url`].
    #[must_use]
    pub fn resolve_url(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            return target.to_string();
        }
        format!("{}/{}", self.api_base_url, target.trim_start_matches('/'))
    }
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_config_default() {
        let config = ConsoleConfig::default();
        assert!(config.api_base_url.starts_with("http"));
        assert!(!config.api_base_url.ends_with('/'));
        assert!(!config.log_level.is_empty());
    }

    #[test]
    fn test_with_api_base_url_trims_trailing_slash() {
        let config = ConsoleConfig::new().with_api_base_url("http://gym.local:9000/");
        assert_eq!(config.api_base_url, "http://gym.local:9000");
    }

    #[test]
    fn test_resolve_url() {
        let config = ConsoleConfig::new().with_api_base_url("http://gym.local");
        assert_eq!(config.resolve_url("/activities"), "http://gym.local/activities");
        assert_eq!(config.resolve_url("users/3"), "http://gym.local/users/3");
        assert_eq!(
            config.resolve_url("https://elsewhere.test/x"),
            "https://elsewhere.test/x"
        );
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" ON "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn test_console_config_builders() {
        let config = ConsoleConfig::new()
            .with_log_level("debug")
            .with_logout_on_unauthorized(true);
        assert_eq!(config.log_level, "debug");
        assert!(config.logout_on_unauthorized);
    }
}
