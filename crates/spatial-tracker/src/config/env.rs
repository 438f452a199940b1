// crates/spatial-tracker/src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use tracing::{debug, warn};

/// Settings read from SPATIAL_* environment variables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvConfig {
    /// Feature toggle override (SPATIAL_ACTIVE)
    pub active: Option<bool>,
    /// Radar grid radius override (SPATIAL_GRID_RADIUS)
    pub grid_radius: Option<u32>,
}

impl EnvConfig {
    /// Load from the process environment (call once at startup)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary lookup so tests don't touch the process env
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let active = lookup("SPATIAL_ACTIVE").and_then(|v| {
            let parsed = parse_bool(&v);
            if parsed.is_none() {
                warn!(value = %v, "SPATIAL_ACTIVE is not a boolean, ignoring");
            }
            parsed
        });

        let grid_radius = lookup("SPATIAL_GRID_RADIUS").and_then(|v| match v.trim().parse() {
            Ok(r) => Some(r),
            Err(_) => {
                warn!(value = %v, "SPATIAL_GRID_RADIUS is not a number, ignoring");
                None
            }
        });

        let config = Self {
            active,
            grid_radius,
        };
        debug!(?config, "Environment configuration loaded");
        config
    }

    /// Log level override (SPATIAL_LOG_LEVEL). Read on its own, without
    /// emitting events, since the subscriber depends on it.
    pub fn log_level_from_env() -> Option<String> {
        Self::log_level_from_lookup(|key| std::env::var(key).ok())
    }

    fn log_level_from_lookup<F>(lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("SPATIAL_LOG_LEVEL")
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_parse_bool_variants() {
        for v in ["1", "true", "YES", " on "] {
            assert_eq!(parse_bool(v), Some(true), "{v}");
        }
        for v in ["0", "False", "no", "OFF"] {
            assert_eq!(parse_bool(v), Some(false), "{v}");
        }
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_empty_env() {
        let config = EnvConfig::from_lookup(|_| None);
        assert_eq!(config, EnvConfig::default());
    }

    #[test]
    fn test_all_values() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            ("SPATIAL_ACTIVE", "off"),
            ("SPATIAL_GRID_RADIUS", "7"),
        ]));
        assert_eq!(config.active, Some(false));
        assert_eq!(config.grid_radius, Some(7));
    }

    #[test]
    fn test_log_level_read_alone() {
        let lookup = lookup_from(&[("SPATIAL_LOG_LEVEL", " Trace "), ("SPATIAL_ACTIVE", "bogus")]);
        assert_eq!(
            EnvConfig::log_level_from_lookup(&lookup).as_deref(),
            Some("trace")
        );
        assert_eq!(EnvConfig::log_level_from_lookup(|_| None), None);
    }

    #[test]
    fn test_invalid_values_ignored() {
        let config = EnvConfig::from_lookup(lookup_from(&[
            ("SPATIAL_ACTIVE", "sometimes"),
            ("SPATIAL_GRID_RADIUS", "-2"),
            ("SPATIAL_LOG_LEVEL", "  "),
        ]));
        assert_eq!(config, EnvConfig::default());
    }
}
