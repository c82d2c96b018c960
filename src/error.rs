//! Typed errors for configuration parsing and pool access.
//!
//! Initialization faults are folded into the pool's FAILED state rather than
//! escaping to the caller; acquisition faults come back as values so callers
//! can decide whether to retry.

use thiserror::Error;

/// Errors raised while loading or validating pool settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required property is absent from the source.
    #[error("missing required property `{0}`")]
    MissingProperty(&'static str),

    /// A property is present but does not parse as the expected type.
    #[error("property `{key}` is not a valid {expected}: `{value}`")]
    MalformedProperty {
        key: &'static str,
        expected: &'static str,
        value: String,
    },

    /// Sizing fields contradict each other (e.g. minIdle > maxIdle).
    #[error("invalid pool sizing: {0}")]
    InvalidSizing(String),

    /// The properties source could not be read.
    #[error("failed to read properties: {0}")]
    Read(#[from] std::io::Error),
}

/// Errors surfaced by the pool facade.
#[derive(Debug, Error)]
pub enum PoolError {
    /// Settings were rejected before a pool could be built.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The server address did not form a valid connection URL.
    #[error("invalid server address: {0}")]
    Address(#[source] redis::RedisError),

    /// The pool could not establish its initial connections.
    #[error("pool initialization failed: {0}")]
    Init(#[source] r2d2::Error),

    /// The pool is in the FAILED state; no connection will ever be produced
    /// until a new pool is constructed.
    #[error("pool unavailable: {reason}")]
    Unavailable { reason: String },

    /// Checkout failed (pool exhausted past the configured wait, or the
    /// backend refused a fresh connection).
    #[error("connection acquisition failed: {0}")]
    Acquire(#[source] r2d2::Error),
}
