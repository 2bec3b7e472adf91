//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Provides the durable Ride Store behind the `RideRepository` port, backed by
//! `diesel-async` over a `bb8` pool.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) are
//!   private to this module and never reach the domain.
//! - Every database error is mapped to a `RideRepositoryError`.
//!
//! # Example
//!
//! ```rust,no_run
//! use rideshare::outbound::persistence::{DbPool, DieselRideRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rides")).await?;
//! let repo = DieselRideRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_ride_repository;
mod models;
mod pool;
mod schema;

pub use diesel_ride_repository::DieselRideRepository;
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
