//! Engine configuration.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_MAX_QUERY_LENGTH, DEFAULT_PREFIX_LENGTH, DEFAULT_REQUEST_TIMEOUT_MS,
    DEFAULT_STREAM_LIMIT,
};
use crate::errors::{Error, Result};

/// Tunables shared by the classifier and the ranking engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Maximum entries returned per ranking stream
    pub stream_limit: usize,
    /// Number of leading code digits a stream record must share with the target code
    pub prefix_length: usize,
    /// Longest accepted classifier query, in characters
    pub max_query_length: usize,
    /// Deadline for `rank_with_timeout`
    #[serde(with = "duration_millis")]
    pub request_timeout: Duration,
    /// Leave the exporting country out of the marketplace demand stream
    pub exclude_origin_demand: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stream_limit: DEFAULT_STREAM_LIMIT,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            max_query_length: DEFAULT_MAX_QUERY_LENGTH,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            exclude_origin_demand: true,
        }
    }
}

impl EngineConfig {
    /// Loads the configuration from the environment (and a `.env` file when present).
    ///
    /// Recognized variables: `TW_STREAM_LIMIT`, `TW_PREFIX_LENGTH`,
    /// `TW_MAX_QUERY_LENGTH`, `TW_REQUEST_TIMEOUT_MS`,
    /// `TW_EXCLUDE_ORIGIN_DEMAND`. Missing variables keep
    /// their defaults; unparsable ones are rejected.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let timeout_ms = parse_var(
            &lookup,
            "TW_REQUEST_TIMEOUT_MS",
            defaults.request_timeout.as_millis() as u64,
        )?;

        let config = Self {
            stream_limit: parse_var(&lookup, "TW_STREAM_LIMIT", defaults.stream_limit)?,
            prefix_length: parse_var(&lookup, "TW_PREFIX_LENGTH", defaults.prefix_length)?,
            max_query_length: parse_var(
                &lookup,
                "TW_MAX_QUERY_LENGTH",
                defaults.max_query_length,
            )?,
            request_timeout: Duration::from_millis(timeout_ms),
            exclude_origin_demand: parse_var(
                &lookup,
                "TW_EXCLUDE_ORIGIN_DEMAND",
                defaults.exclude_origin_demand,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.stream_limit == 0 {
            return Err(Error::InvalidConfigValue(
                "stream limit must be at least 1".to_string(),
            ));
        }
        if !(2..=6).contains(&self.prefix_length) {
            return Err(Error::InvalidConfigValue(format!(
                "prefix length must be between 2 and 6, got {}",
                self.prefix_length
            )));
        }
        if self.max_query_length == 0 {
            return Err(Error::InvalidConfigValue(
                "max query length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map_err(|_| {
            Error::InvalidConfigValue(format!("{} has an invalid value '{}'", key, raw))
        }),
        _ => Ok(default),
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
