//! Runtime configuration for entity retrieval.

/// Environment variable for the deep level used when a caller does not ask
/// for one.
pub const DEEP_LEVEL_VAR: &str = "REVIEWGRAPH_DEEP_LEVEL";
/// Environment variable capping any requested deep level.
pub const MAX_DEEP_LEVEL_VAR: &str = "REVIEWGRAPH_MAX_DEEP_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreConfig {
    pub default_deep_level: u32,
    pub max_deep_level: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_deep_level: 1,
            max_deep_level: 5,
        }
    }
}

impl StoreConfig {
    /// Read both levels from the environment, falling back to the defaults
    /// when a variable is unset or not a number.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`StoreConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_deep_level = read_level(&lookup, MAX_DEEP_LEVEL_VAR, defaults.max_deep_level);
        let default_deep_level = read_level(&lookup, DEEP_LEVEL_VAR, defaults.default_deep_level);

        if default_deep_level > max_deep_level {
            tracing::warn!(
                default_deep_level,
                max_deep_level,
                "{} exceeds {}; clamping",
                DEEP_LEVEL_VAR,
                MAX_DEEP_LEVEL_VAR
            );
        }

        Self {
            default_deep_level: default_deep_level.min(max_deep_level),
            max_deep_level,
        }
    }

    /// Effective deep level for a request: the default when none is asked for,
    /// never above the maximum.
    pub fn clamp(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_deep_level)
            .min(self.max_deep_level)
    }
}

fn read_level(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u32) -> u32 {
    match lookup(name) {
        None => default,
        Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
            tracing::warn!(
                value = %raw,
                default,
                "{} is not a valid deep level; using default",
                name
            );
            default
        }),
    }
}
