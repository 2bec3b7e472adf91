//! In-process `RideRepository` adapter.
//!
//! Rides live in a `RwLock<HashMap<RideId, Ride>>`. Lookups clone a snapshot
//! under the read lock; commits run a synchronous compare-and-commit under the
//! write lock. No guard is ever held across an `.await`, so a cancelled caller
//! cannot leave a half-applied admission behind. The single lock covers every
//! ride, so a commit on one ride briefly holds up lookups on all others.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{RideRepository, RideRepositoryError};
use crate::domain::{Commuter, CommuterId, Ride, RideAdmission, RideId};

const POISONED: &str = "in-memory ride store lock poisoned";

/// Ride Store kept in process memory.
#[derive(Debug)]
pub struct InMemoryRideRepository {
    rides: RwLock<HashMap<RideId, Ride>>,
    next_commuter_id: AtomicI32,
}

impl Default for InMemoryRideRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRideRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rides: RwLock::new(HashMap::new()),
            next_commuter_id: AtomicI32::new(1),
        }
    }

    /// Create a store pre-populated with `rides`.
    ///
    /// A later ride with the same id replaces an earlier one.
    ///
    /// # Examples
    /// ```
    /// use rideshare::outbound::memory::InMemoryRideRepository;
    ///
    /// let store = InMemoryRideRepository::with_rides(Vec::new());
    /// assert_eq!(store.ride_count(), 0);
    /// ```
    pub fn with_rides(rides: impl IntoIterator<Item = Ride>) -> Self {
        let rides: HashMap<RideId, Ride> = rides.into_iter().map(|ride| (ride.id(), ride)).collect();
        let next_id = rides
            .values()
            .flat_map(|ride| ride.commuters().iter().map(|commuter| commuter.id.get()))
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            rides: RwLock::new(rides),
            next_commuter_id: AtomicI32::new(next_id),
        }
    }

    /// Number of rides held.
    pub fn ride_count(&self) -> usize {
        self.rides.read().map_or(0, |rides| rides.len())
    }

    fn allocate_commuter_id(&self) -> CommuterId {
        CommuterId::new(self.next_commuter_id.fetch_add(1, Ordering::Relaxed))
    }
}

#[async_trait]
impl RideRepository for InMemoryRideRepository {
    async fn find_ride_with_commuters(
        &self,
        ride_id: RideId,
    ) -> Result<Option<Ride>, RideRepositoryError> {
        let rides = self
            .rides
            .read()
            .map_err(|_| RideRepositoryError::query(POISONED))?;
        Ok(rides.get(&ride_id).cloned())
    }

    async fn persist(&self, admission: &RideAdmission) -> Result<Commuter, RideRepositoryError> {
        let mut rides = self
            .rides
            .write()
            .map_err(|_| RideRepositoryError::query(POISONED))?;

        let ride_id = admission.ride_id();
        let ride = rides
            .get_mut(&ride_id)
            .ok_or_else(|| RideRepositoryError::ride_missing(ride_id))?;
        if ride.revision() != admission.expected_revision() {
            return Err(RideRepositoryError::revision_mismatch(
                admission.expected_revision(),
                ride.revision(),
            ));
        }

        let commuter = admission
            .commuter()
            .clone()
            .into_commuter(self.allocate_commuter_id(), ride_id);
        ride.record_admission(commuter.clone());
        Ok(commuter)
    }
}
