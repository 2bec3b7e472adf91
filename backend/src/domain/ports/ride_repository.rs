//! Driven port for ride persistence.
//!
//! The [`RideRepository`] trait is the Ride Store: lookup by id plus a
//! transactional, revision-checked commit of one admission. Adapters live in
//! `outbound::persistence` (PostgreSQL) and `outbound::memory` (in-process).

use async_trait::async_trait;

use crate::domain::{Commuter, Ride, RideAdmission, RideId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by ride repository adapters.
    pub enum RideRepositoryError {
        /// The store could not be reached.
        Connection { message: String } =>
            "ride repository connection failed: {message}",
        /// Query or mutation failed, or a stored row was corrupt.
        Query { message: String } =>
            "ride repository query failed: {message}",
        /// The ride changed since it was read.
        RevisionMismatch { expected: u32, actual: u32 } =>
            "revision mismatch: expected {expected}, found {actual}",
        /// The ride disappeared between lookup and commit.
        RideMissing { ride_id: RideId } =>
            "ride {ride_id} no longer exists",
    }
}

impl RideRepositoryError {
    /// Whether the failure is an optimistic-concurrency conflict that a fresh
    /// lookup can resolve.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RevisionMismatch { .. } | Self::RideMissing { .. })
    }
}

/// Port for ride lookup and admission commits.
///
/// # Revision semantics
///
/// - Rides start at revision 1.
/// - Each committed admission increments the revision by exactly one.
/// - [`RideRepository::persist`] writes nothing unless the stored revision
///   equals [`RideAdmission::expected_revision`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Fetch a ride with its committed commuters and current revision.
    ///
    /// Returns `None` when no ride has the given identifier.
    async fn find_ride_with_commuters(
        &self,
        ride_id: RideId,
    ) -> Result<Option<Ride>, RideRepositoryError>;

    /// Commit one admission atomically and return the stored commuter.
    ///
    /// # Errors
    ///
    /// - [`RideRepositoryError::RevisionMismatch`] when the ride moved past
    ///   the expected revision.
    /// - [`RideRepositoryError::RideMissing`] when the ride no longer exists.
    async fn persist(&self, admission: &RideAdmission) -> Result<Commuter, RideRepositoryError>;
}

/// Fixture implementation for tests that do not exercise storage.
///
/// Lookups find nothing and commits are refused as missing rides.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRideRepository;

#[async_trait]
impl RideRepository for FixtureRideRepository {
    async fn find_ride_with_commuters(
        &self,
        _ride_id: RideId,
    ) -> Result<Option<Ride>, RideRepositoryError> {
        Ok(None)
    }

    async fn persist(&self, admission: &RideAdmission) -> Result<Commuter, RideRepositoryError> {
        Err(RideRepositoryError::ride_missing(admission.ride_id()))
    }
}
