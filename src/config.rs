//! # Pool Settings
//!
//! Purpose: Parse and validate pool sizing and server address from a
//! Java-properties-style key/value source.
//!
//! ## Design Principles
//! 1. **Load Once**: settings are an immutable record; nothing mutates them
//!    after construction.
//! 2. **Fail Fast**: every missing or malformed property is a typed
//!    `ConfigError`, reported before any pool is built.
//! 3. **Explicit Bounds**: sizing invariants are checked here so the pool
//!    never sees contradictory limits.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

const KEY_MAX_IDLE: &str = "redis.maxIdle";
const KEY_MIN_IDLE: &str = "redis.minIdle";
const KEY_MAX_TOTAL: &str = "redis.maxTotal";
const KEY_URL: &str = "redis.url";
const KEY_PORT: &str = "redis.port";
const KEY_MAX_WAIT_MILLIS: &str = "redis.maxWaitMillis";

const DEFAULT_MAX_WAIT: Duration = Duration::from_millis(5000);

/// Immutable pool configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    /// Upper bound on idle connections kept around. Validated against the
    /// other sizing fields, but the underlying pool has no idle ceiling
    /// separate from `max_total`; stale idle connections are pruned by an
    /// idle timeout instead.
    pub max_idle: u32,
    /// Idle connections the pool tries to maintain.
    pub min_idle: u32,
    /// Hard cap on connections, idle plus checked out.
    pub max_total: u32,
    /// Server hostname or IP.
    pub host: String,
    /// Server TCP port, 1..=65535.
    pub port: u16,
    /// Longest a checkout may block before giving up.
    pub max_wait: Duration,
}

impl PoolSettings {
    /// Parses settings from properties text (`key=value` lines, `#` or `!`
    /// comments, blank lines ignored).
    pub fn from_properties(text: &str) -> Result<Self, ConfigError> {
        let props = parse_properties(text);

        let max_idle = require_u32(&props, KEY_MAX_IDLE)?;
        let min_idle = require_u32(&props, KEY_MIN_IDLE)?;
        let max_total = require_u32(&props, KEY_MAX_TOTAL)?;
        let host = props
            .get(KEY_URL)
            .filter(|value| !value.is_empty())
            .cloned()
            .ok_or(ConfigError::MissingProperty(KEY_URL))?;
        let port = require_port(&props, KEY_PORT)?;
        let max_wait = match props.get(KEY_MAX_WAIT_MILLIS) {
            Some(value) => Duration::from_millis(parse_number(KEY_MAX_WAIT_MILLIS, value)?),
            None => DEFAULT_MAX_WAIT,
        };

        let settings = PoolSettings {
            max_idle,
            min_idle,
            max_total,
            host,
            port,
            max_wait,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reads and parses a properties file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_properties(&text)
    }

    /// Connection URL understood by the underlying client.
    pub fn connection_url(&self) -> String {
        format!("redis://{}:{}/", self.host, self.port)
    }

    /// Checks the sizing invariants. Runs automatically when parsing, and
    /// again before a pool is built, since the fields are public and a
    /// directly constructed record may contradict itself.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_total == 0 {
            return Err(ConfigError::InvalidSizing(format!(
                "{KEY_MAX_TOTAL} must be at least 1"
            )));
        }
        if self.min_idle > self.max_idle {
            return Err(ConfigError::InvalidSizing(format!(
                "{KEY_MIN_IDLE} ({}) exceeds {KEY_MAX_IDLE} ({})",
                self.min_idle, self.max_idle
            )));
        }
        if self.max_idle > self.max_total {
            return Err(ConfigError::InvalidSizing(format!(
                "{KEY_MAX_IDLE} ({}) exceeds {KEY_MAX_TOTAL} ({})",
                self.max_idle, self.max_total
            )));
        }
        Ok(())
    }
}

fn parse_properties(text: &str) -> HashMap<&str, String> {
    let mut props = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            props.insert(key.trim(), value.trim().to_string());
        }
    }
    props
}

fn require_u32(props: &HashMap<&str, String>, key: &'static str) -> Result<u32, ConfigError> {
    let value = props.get(key).ok_or(ConfigError::MissingProperty(key))?;
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::MalformedProperty {
            key,
            expected: "non-negative integer",
            value: value.clone(),
        })
}

fn require_port(props: &HashMap<&str, String>, key: &'static str) -> Result<u16, ConfigError> {
    let value = props.get(key).ok_or(ConfigError::MissingProperty(key))?;
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ConfigError::MalformedProperty {
            key,
            expected: "port in 1..=65535",
            value: value.clone(),
        }),
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::MalformedProperty {
            key,
            expected: "non-negative integer",
            value: value.to_string(),
        })
}
