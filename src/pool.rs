//! # Connection Pool Facade
//!
//! Purpose: Front an `r2d2` pool of `redis` connections behind acquire and
//! release, with initialization faults folded into a FAILED state instead of
//! escaping to callers.
//!
//! ## Design Principles
//! 1. **Off-The-Shelf Pooling**: sizing and wait policy are configuration of
//!    `r2d2`, not reimplementation.
//! 2. **Two States**: the handle is READY or FAILED from construction on;
//!    a FAILED handle answers every acquire immediately, it never blocks.
//! 3. **RAII Release**: dropping a checked-out connection returns it; the
//!    explicit `release` exists for call sites holding an `Option`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::config::PoolSettings;
use crate::error::PoolError;

/// Connection checked out of the pool. Derefs to [`redis::Connection`], so
/// the full command API of the client library is available on it. Dropping
/// it returns the connection to the pool.
pub type PooledConnection = r2d2::PooledConnection<redis::Client>;

enum State {
    Ready(r2d2::Pool<redis::Client>),
    Failed(String),
}

/// Shared handle to the connection pool.
///
/// Construct it once, clone it freely; all clones refer to the same pool.
/// Acquire and release are safe to call from any number of threads, the
/// pool's internal synchronization keeps checkout and return atomic.
#[derive(Clone)]
pub struct RedisPool {
    state: Arc<State>,
}

impl RedisPool {
    /// Builds a pool from validated settings.
    ///
    /// Construction itself never fails: if the settings contradict each
    /// other or the pool cannot establish its initial connections the
    /// handle comes back in the FAILED state, the
    /// fault is logged, and every subsequent [`acquire`](Self::acquire)
    /// reports [`PoolError::Unavailable`].
    pub fn new(settings: PoolSettings) -> Self {
        // Directly constructed settings bypass the parser, so re-check the
        // sizing invariants before r2d2 sees them; its builder asserts.
        if let Err(err) = settings.validate() {
            let err = PoolError::Config(err);
            error!(%err, "invalid pool configuration");
            return RedisPool {
                state: Arc::new(State::Failed(err.to_string())),
            };
        }

        let state = match build_pool(&settings) {
            Ok(pool) => {
                debug!(
                    host = %settings.host,
                    port = settings.port,
                    max_total = settings.max_total,
                    "connection pool ready"
                );
                State::Ready(pool)
            }
            Err(err) => {
                error!(%err, "connection pool initialization failed");
                State::Failed(err.to_string())
            }
        };
        RedisPool {
            state: Arc::new(state),
        }
    }

    /// Loads settings from a properties file and builds the pool.
    ///
    /// Configuration faults are treated like initialization faults: logged
    /// and folded into the FAILED state rather than surfaced as a panic.
    pub fn from_properties_file(path: impl AsRef<std::path::Path>) -> Self {
        match PoolSettings::from_file(path.as_ref()) {
            Ok(settings) => Self::new(settings),
            Err(err) => {
                let err = PoolError::Config(err);
                error!(path = %path.as_ref().display(), %err, "invalid pool configuration");
                RedisPool {
                    state: Arc::new(State::Failed(err.to_string())),
                }
            }
        }
    }

    /// Checks a connection out of the pool.
    ///
    /// Blocks at most the configured wait when the pool is exhausted. In the
    /// FAILED state this returns immediately; initialization is never
    /// retried automatically.
    pub fn acquire(&self) -> Result<PooledConnection, PoolError> {
        match &*self.state {
            State::Ready(pool) => pool.get().map_err(|err| {
                warn!(%err, "connection acquisition failed");
                PoolError::Acquire(err)
            }),
            State::Failed(reason) => Err(PoolError::Unavailable {
                reason: reason.clone(),
            }),
        }
    }

    /// Returns a connection to the pool. `None` is a no-op, not an error.
    pub fn release(&self, conn: Option<PooledConnection>) {
        if let Some(conn) = conn {
            // The guard's drop hands the connection back to r2d2.
            drop(conn);
        }
    }

    /// Whether initialization succeeded.
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state, State::Ready(_))
    }

    /// Diagnostic recorded when initialization failed.
    pub fn failure(&self) -> Option<&str> {
        match &*self.state {
            State::Ready(_) => None,
            State::Failed(reason) => Some(reason),
        }
    }

    /// Live connections, idle plus checked out. Zero for a FAILED pool.
    pub fn connections(&self) -> u32 {
        match &*self.state {
            State::Ready(pool) => pool.state().connections,
            State::Failed(_) => 0,
        }
    }

    /// Connections currently idle in the pool. Zero for a FAILED pool.
    pub fn idle_connections(&self) -> u32 {
        match &*self.state {
            State::Ready(pool) => pool.state().idle_connections,
            State::Failed(_) => 0,
        }
    }
}

impl std::fmt::Debug for RedisPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.state {
            State::Ready(pool) => f
                .debug_struct("RedisPool")
                .field("state", &"ready")
                .field("connections", &pool.state().connections)
                .field("idle", &pool.state().idle_connections)
                .finish(),
            State::Failed(reason) => f
                .debug_struct("RedisPool")
                .field("state", &"failed")
                .field("reason", reason)
                .finish(),
        }
    }
}

fn build_pool(settings: &PoolSettings) -> Result<r2d2::Pool<redis::Client>, PoolError> {
    let client = redis::Client::open(settings.connection_url()).map_err(PoolError::Address)?;

    // No PING on checkout: authentication is the caller's responsibility
    // after acquire, and a validation round-trip would hit NOAUTH first.
    r2d2::Pool::builder()
        .max_size(settings.max_total)
        .min_idle(Some(settings.min_idle))
        .connection_timeout(settings.max_wait)
        .test_on_check_out(false)
        .idle_timeout(Some(Duration::from_secs(300)))
        .build(client)
        .map_err(PoolError::Init)
}
