//! # Pooled Redis Connection Facade
//!
//! Purpose: Hand out pooled connections to a Redis-compatible server from a
//! properties-style configuration, without reimplementing any protocol or
//! pooling machinery.
//!
//! ## Design Principles
//! 1. **Facade Pattern**: `RedisPool` hides the `redis` client and the `r2d2`
//!    pool behind two operations, acquire and release.
//! 2. **Fail Closed, Never Crash**: configuration or initialization faults
//!    put the handle in a FAILED state; every later acquire reports it as a
//!    typed error instead of panicking or blocking.
//! 3. **Shared Handle**: the pool is an explicitly constructed object that is
//!    cheap to clone and pass around, not a hidden global.
//! 4. **Bounded Waits**: checkout never blocks past the configured wait.
//!
//! ```no_run
//! use redis_pool::{PoolSettings, RedisPool};
//!
//! let settings = PoolSettings::from_file("redis.properties").unwrap();
//! let pool = RedisPool::new(settings);
//! let conn = pool.acquire().unwrap();
//! // run commands, authenticate if the server requires it, ...
//! pool.release(Some(conn));
//! ```

mod config;
mod error;
mod pool;

pub use config::PoolSettings;
pub use error::{ConfigError, PoolError};
pub use pool::{PooledConnection, RedisPool};
