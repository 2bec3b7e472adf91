//! Driving port for reading a ride with its commuters.

use async_trait::async_trait;

use crate::domain::{Error, Ride, RideId};

/// Read model returned by [`RideDetailsQuery::ride_details`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideDetails {
    pub ride: Ride,
    pub remaining_capacity: u32,
    pub is_full: bool,
}

impl From<Ride> for RideDetails {
    fn from(ride: Ride) -> Self {
        Self {
            remaining_capacity: ride.remaining_capacity(),
            is_full: ride.is_full(),
            ride,
        }
    }
}

/// Driving port for ride detail lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RideDetailsQuery: Send + Sync {
    /// Load a ride and its commuters.
    ///
    /// # Errors
    ///
    /// Returns [`Error::not_found`] when the ride does not exist.
    async fn ride_details(&self, ride_id: RideId) -> Result<RideDetails, Error>;
}

/// Fixture implementation reporting every ride as missing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRideDetailsQuery;

#[async_trait]
impl RideDetailsQuery for FixtureRideDetailsQuery {
    async fn ride_details(&self, ride_id: RideId) -> Result<RideDetails, Error> {
        Err(Error::not_found(format!("ride {ride_id} not found")))
    }
}
