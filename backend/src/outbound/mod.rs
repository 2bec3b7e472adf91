//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed Ride Store using Diesel.
//! - **memory**: in-process Ride Store for local runs and tests.
//!
//! Adapters translate between domain types and storage representations. They
//! contain no business rules beyond the revision check the port demands.

pub mod memory;
pub mod persistence;
