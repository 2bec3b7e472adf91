//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use rideshare::domain::{JoinRetryPolicy, Ride};
use rideshare::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) retry_policy: JoinRetryPolicy,
    pub(crate) seed_rides: Vec<Ride>,
}

impl ServerConfig {
    /// Construct a server configuration bound to `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            db_pool: None,
            retry_policy: JoinRetryPolicy::default(),
            seed_rides: Vec::new(),
        }
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// With a pool the ride store is PostgreSQL; without one the server keeps
    /// rides in memory and seed rides populate it.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override how many times a join retries after revision conflicts.
    #[must_use]
    pub fn with_retry_policy(mut self, retry_policy: JoinRetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    /// Rides loaded into the in-memory store at startup.
    ///
    /// Ignored when a database pool is attached.
    #[must_use]
    pub fn with_seed_rides(mut self, rides: Vec<Ride>) -> Self {
        self.seed_rides = rides;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
