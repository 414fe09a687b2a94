//! Tracing/logging initialization.
//!
//! Filtering comes from `RUST_LOG` (default `info`). Output is JSON unless
//! `GRIDSTORE_LOG_FORMAT=pretty`.

use tracing_subscriber::EnvFilter;

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("RUST_LOG").ok(),
            std::env::var("GRIDSTORE_LOG_FORMAT").ok(),
        )
    }

    fn from_vars(filter: Option<String>, format: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            filter: filter
                .filter(|f| !f.trim().is_empty())
                .unwrap_or(defaults.filter),
            json: !matches!(format.as_deref(), Some("pretty")),
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Install the global subscriber.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.pretty().try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_json_at_info() {
        assert_eq!(LogConfig::from_vars(None, None), LogConfig::default());
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        let config = LogConfig::from_vars(Some("  ".to_string()), Some("pretty".to_string()));
        assert_eq!(config.filter, "info");
        assert!(!config.json);
    }

    #[test]
    fn repeated_init_is_harmless() {
        let config = LogConfig::default().with_filter("gridstore_inventory=debug");
        init(&config);
        init(&config);
    }
}
