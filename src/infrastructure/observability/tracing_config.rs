/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub json_format: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            json_format: std::env::var("LOG_FORMAT")
                .map(|v| v.to_lowercase() == "json")
                .unwrap_or(false),
        }
    }
}
