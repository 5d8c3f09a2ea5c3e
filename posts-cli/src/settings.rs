const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone)]
pub struct Settings {
    pub log_level: String,
}

impl Settings {
    /// Базовый URL API сюда не входит: он зашит в `posts_client::DEFAULT_BASE_URL`.
    pub fn from_env() -> Self {
        let log_level = resolve_log_level(
            std::env::var("LOG_LEVEL").ok().as_deref(),
            std::env::var("RUST_LOG").ok().as_deref(),
        );

        Self { log_level }
    }
}

/// Пустое значение считается незаданным.
fn resolve_log_level(log_level: Option<&str>, rust_log: Option<&str>) -> String {
    [log_level, rust_log]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or(DEFAULT_LOG_LEVEL)
        .to_string()
}
