pub const DEFAULT_FILTER: &str = "info,deepscan=debug,tower_http=debug";

/// Configuration for tracing initialization.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn new(environment: impl Into<String>, json_format: bool, filter: Option<&str>) -> Self {
        Self {
            environment: environment.into(),
            json_format: json_format || Self::json_from_env(),
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(DEFAULT_FILTER)
                .to_string(),
        }
    }

    fn json_from_env() -> bool {
        std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
            false,
            None,
        )
    }
}
