//! Tracing/logging initialization.
//!
//! `RUST_LOG` selects the filter (default `info`); `REVIEWGRAPH_LOG_FORMAT`
//! selects JSON (default) or plain text output.

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format.
pub const LOG_FORMAT_VAR: &str = "REVIEWGRAPH_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Text,
}

impl LogFormat {
    /// Parse a format name; `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "text" | "plain" => Some(Self::Text),
            _ => None,
        }
    }

    /// Format from [`LOG_FORMAT_VAR`], plus the raw value when it was set but
    /// not understood.
    pub fn from_env() -> (Self, Option<String>) {
        match std::env::var(LOG_FORMAT_VAR) {
            Ok(raw) => match Self::parse(&raw) {
                Some(format) => (format, None),
                None => (Self::default(), Some(raw)),
            },
            Err(_) => (Self::default(), None),
        }
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let (format, rejected) = LogFormat::from_env();
    init_with(format);

    if let Some(raw) = rejected {
        ::tracing::warn!(value = %raw, "unrecognized {}; using JSON logs", LOG_FORMAT_VAR);
    }
}

/// Install the global subscriber with an explicit format. Returns `false` when
/// one was already installed.
pub fn init_with(format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_formats() {
        assert_eq!(LogFormat::parse("json"), Some(LogFormat::Json));
        assert_eq!(LogFormat::parse(" TEXT "), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("plain"), Some(LogFormat::Text));
        assert_eq!(LogFormat::parse("yaml"), None);
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_with(LogFormat::Text);
        assert!(!init_with(LogFormat::Json));
        init();
    }
}
