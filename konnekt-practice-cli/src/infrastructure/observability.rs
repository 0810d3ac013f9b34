use crate::infrastructure::error::{CliError, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crates whose logs follow `default_level` unless `RUST_LOG` says otherwise
const PRACTICE_CRATES: [&str; 3] = [
    "konnekt_practice_cli",
    "konnekt_practice_core",
    "konnekt_practice_gateway",
];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub default_level: tracing::Level,
    pub show_thread_ids: bool,
    pub show_targets: bool,
    /// Whether to write logs to stderr at all
    pub show_logs: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            default_level: tracing::Level::WARN,
            show_thread_ids: false,
            show_targets: true,
            show_logs: true,
        }
    }
}

impl LogConfig {
    /// Parse a level name such as `info` or `DEBUG`
    pub fn with_level_name(mut self, level: &str) -> Result<Self> {
        self.default_level = level
            .trim()
            .parse()
            .map_err(|_| CliError::InvalidLogLevel(level.to_string()))?;
        Ok(self)
    }

    /// Hide logs (the console owns stdout and stderr)
    pub fn without_logs(mut self) -> Self {
        self.show_logs = false;
        self
    }

    fn env_filter(&self) -> Result<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }

        let mut filter = EnvFilter::new("warn");
        for krate in PRACTICE_CRATES {
            let directive = format!("{}={}", krate, self.default_level)
                .parse()
                .map_err(|e| CliError::Logging(format!("{}", e)))?;
            filter = filter.add_directive(directive);
        }
        Ok(filter)
    }

    pub fn init(self) -> Result<()> {
        let env_filter = self.env_filter()?;

        if self.show_logs {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(self.show_targets)
                .with_thread_ids(self.show_thread_ids)
                .compact();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()))
        } else {
            // Silent mode: no fmt layer, just filter
            tracing_subscriber::registry()
                .with(env_filter)
                .try_init()
                .map_err(|e| CliError::Logging(e.to_string()))
        }
    }
}
