//! Driving port for the capacity-bounded ride-join operation.
//!
//! Inbound adapters call [`RideJoinCommand::join_ride`] and match the returned
//! [`JoinOutcome`]. Rejections are ordinary values, not errors; callers that
//! prefer `?` can collapse an outcome with [`JoinOutcome::into_result`].

use async_trait::async_trait;
use serde_json::json;

use crate::domain::{CapacityExceeded, Commuter, Error, NewCommuter, RideId};

use super::RideRepositoryError;

/// Successful admission of a commuter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedRide {
    pub ride_id: RideId,
    /// The commuter as stored, including its assigned identifier.
    pub commuter: Commuter,
    /// Seats left after this admission.
    pub remaining_capacity: u32,
}

/// Terminal result of one `join_ride` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(JoinedRide),
    RideNotFound(RideId),
    CapacityExceeded(CapacityExceeded),
    PersistenceFailed(RideRepositoryError),
}

impl JoinOutcome {
    /// Collapse the outcome into the crate-wide error type.
    ///
    /// # Examples
    /// ```
    /// use rideshare::domain::ports::JoinOutcome;
    /// use rideshare::domain::{ErrorCode, RideId};
    ///
    /// let err = JoinOutcome::RideNotFound(RideId::new(1))
    ///     .into_result()
    ///     .expect_err("missing rides are rejected");
    /// assert_eq!(err.code(), ErrorCode::NotFound);
    /// ```
    pub fn into_result(self) -> Result<JoinedRide, Error> {
        match self {
            Self::Joined(joined) => Ok(joined),
            Self::RideNotFound(ride_id) => Err(Error::not_found(format!(
                "ride {ride_id} not found"
            ))),
            Self::CapacityExceeded(rejection) => Err(Error::conflict(rejection.to_string())
                .with_details(json!({
                    "code": "capacity_exceeded",
                    "maximumCapacity": rejection.maximum_capacity,
                }))),
            Self::PersistenceFailed(error) => Err(map_persistence_failure(&error)),
        }
    }
}

fn map_persistence_failure(error: &RideRepositoryError) -> Error {
    match error {
        RideRepositoryError::Connection { .. } => {
            Error::service_unavailable(format!("ride store unavailable: {error}"))
        }
        RideRepositoryError::RevisionMismatch { .. } | RideRepositoryError::RideMissing { .. } => {
            Error::service_unavailable("ride is busy, please retry")
        }
        RideRepositoryError::Query { .. } => Error::internal(format!("ride store error: {error}")),
    }
}

/// Driving port for joining rides.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideJoinCommand: Send + Sync {
    /// Attempt to admit `commuter` to the ride identified by `ride_id`.
    ///
    /// Every call terminates in exactly one [`JoinOutcome`].
    async fn join_ride(&self, ride_id: RideId, commuter: NewCommuter) -> JoinOutcome;
}

/// Fixture implementation reporting every ride as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRideJoinCommand;

#[async_trait]
impl RideJoinCommand for FixtureRideJoinCommand {
    async fn join_ride(&self, ride_id: RideId, _commuter: NewCommuter) -> JoinOutcome {
        JoinOutcome::RideNotFound(ride_id)
    }
}
