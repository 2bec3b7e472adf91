//! Ride join domain service.
//!
//! Implements [`RideJoinCommand`] on top of the [`RideRepository`] port. Each
//! attempt runs lookup, capacity check and a revision-checked commit. A
//! conflicting commit restarts the sequence from lookup, bounded by
//! [`JoinRetryPolicy`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    JoinOutcome, JoinedRide, RideJoinCommand, RideRepository, RideRepositoryError,
};
use crate::domain::{NewCommuter, RideId};

/// Default bound on lookup-and-commit attempts per join.
pub const DEFAULT_JOIN_MAX_ATTEMPTS: u32 = 8;

/// Bound on how often a join restarts after a revision conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinRetryPolicy {
    max_attempts: u32,
}

impl JoinRetryPolicy {
    /// Build a policy, clamping `max_attempts` to at least one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for JoinRetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_JOIN_MAX_ATTEMPTS)
    }
}

/// Ride join service implementing the join driving port.
#[derive(Clone)]
pub struct RideJoinService<R> {
    ride_repo: Arc<R>,
    retry_policy: JoinRetryPolicy,
}

impl<R> RideJoinService<R> {
    /// Create a service with the default retry policy.
    pub fn new(ride_repo: Arc<R>) -> Self {
        Self::with_retry_policy(ride_repo, JoinRetryPolicy::default())
    }

    pub fn with_retry_policy(ride_repo: Arc<R>, retry_policy: JoinRetryPolicy) -> Self {
        Self {
            ride_repo,
            retry_policy,
        }
    }
}

impl<R> RideJoinService<R>
where
    R: RideRepository,
{
    /// Run one lookup, check and commit pass.
    ///
    /// `Err` carries a conflict that a fresh lookup may resolve; every other
    /// result is terminal.
    async fn attempt_join(
        &self,
        ride_id: RideId,
        commuter: NewCommuter,
        attempt: u32,
    ) -> Result<JoinOutcome, RideRepositoryError> {
        let mut ride = match self.ride_repo.find_ride_with_commuters(ride_id).await {
            Ok(Some(ride)) => ride,
            Ok(None) => {
                info!(%ride_id, attempt, "join rejected: ride not found");
                return Ok(JoinOutcome::RideNotFound(ride_id));
            }
            Err(error) => {
                warn!(%ride_id, attempt, %error, "join failed: ride lookup error");
                return Ok(JoinOutcome::PersistenceFailed(error));
            }
        };

        let admission = match ride.admit(commuter) {
            Ok(admission) => admission,
            Err(rejection) => {
                info!(
                    %ride_id,
                    attempt,
                    maximum_capacity = rejection.maximum_capacity,
                    "join rejected: capacity exceeded"
                );
                return Ok(JoinOutcome::CapacityExceeded(rejection));
            }
        };

        match self.ride_repo.persist(&admission).await {
            Ok(commuter) => {
                ride.record_admission(commuter.clone());
                info!(%ride_id, attempt, commuter_id = %commuter.id, "commuter joined ride");
                Ok(JoinOutcome::Joined(JoinedRide {
                    ride_id,
                    commuter,
                    remaining_capacity: ride.remaining_capacity(),
                }))
            }
            Err(error) if error.is_conflict() => Err(error),
            Err(error) => {
                warn!(%ride_id, attempt, %error, "join failed: ride commit error");
                Ok(JoinOutcome::PersistenceFailed(error))
            }
        }
    }
}

#[async_trait]
impl<R> RideJoinCommand for RideJoinService<R>
where
    R: RideRepository,
{
    async fn join_ride(&self, ride_id: RideId, commuter: NewCommuter) -> JoinOutcome {
        let max_attempts = self.retry_policy.max_attempts();
        let mut attempt = 1;
        loop {
            match self.attempt_join(ride_id, commuter.clone(), attempt).await {
                Ok(outcome) => return outcome,
                Err(conflict) if attempt < max_attempts => {
                    debug!(%ride_id, attempt, %conflict, "join conflicted, retrying from lookup");
                    attempt += 1;
                }
                Err(conflict) => {
                    warn!(%ride_id, attempt, %conflict, "join failed: retry attempts exhausted");
                    return JoinOutcome::PersistenceFailed(conflict);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "ride_join_service_tests.rs"]
mod tests;
