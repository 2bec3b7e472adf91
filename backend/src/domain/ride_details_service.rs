//! Ride details domain service.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Error;
use crate::domain::RideId;
use crate::domain::ports::{RideDetails, RideDetailsQuery, RideRepository, RideRepositoryError};

fn map_repository_error(error: RideRepositoryError) -> Error {
    match error {
        RideRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("ride repository unavailable: {message}"))
        }
        other => Error::internal(format!("ride repository error: {other}")),
    }
}

/// Read-only service implementing [`RideDetailsQuery`].
#[derive(Clone)]
pub struct RideDetailsService<R> {
    ride_repo: Arc<R>,
}

impl<R> RideDetailsService<R> {
    pub fn new(ride_repo: Arc<R>) -> Self {
        Self { ride_repo }
    }
}

#[async_trait]
impl<R> RideDetailsQuery for RideDetailsService<R>
where
    R: RideRepository,
{
    async fn ride_details(&self, ride_id: RideId) -> Result<RideDetails, Error> {
        let ride = self
            .ride_repo
            .find_ride_with_commuters(ride_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("ride {ride_id} not found")))?;

        Ok(RideDetails::from(ride))
    }
}
