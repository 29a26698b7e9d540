use std::sync::Once;

/// Filter used when neither the config nor the environment sets one.
/// wgpu and naga are chatty at `info`; they only surface warnings.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Environment variable consulted before `RUST_LOG`.
pub const FILTER_ENV: &str = "ORRERY_LOG";

/// Logger configuration. `filter` uses `env_logger` directive syntax.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub filter: Option<String>,
    /// Millisecond timestamps on every line. Off gives bare `LEVEL target: msg`.
    pub timestamps: bool,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: None,
            timestamps: true,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    /// Picks the filter: explicit config, then `ORRERY_LOG`, then `RUST_LOG`, then [`DEFAULT_FILTER`].
    pub fn resolve_filter<F>(&self, env: F) -> String
    where
        F: Fn(&str) -> Option<String>,
    {
        self.filter
            .clone()
            .or_else(|| env(FILTER_ENV))
            .or_else(|| env("RUST_LOG"))
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has any effect.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolve_filter(|name| std::env::var(name).ok());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);
        if config.timestamps {
            builder.format_timestamp_millis();
        } else {
            builder.format_timestamp(None);
        }
        builder.init();

        log::debug!("logging initialized (filter: {filter})");
    });
}
