//! Ride and commuter builders shared by the join suites.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use rideshare::domain::ports::{RideRepository, RideRepositoryError};
use rideshare::domain::{
    Commuter, CommuterId, INITIAL_RIDE_REVISION, NewCommuter, Ride, RideAdmission, RideDraft,
    RideId, RideJoinService,
};
use rideshare::outbound::memory::InMemoryRideRepository;

/// A valid pending commuter derived from `name`.
pub fn commuter(name: &str) -> NewCommuter {
    let local = name.to_lowercase().replace(' ', ".");
    NewCommuter::new(name, format!("{local}@example.com"), "555-0100").expect("valid commuter")
}

/// Ride `id` with `capacity` seats and `occupied` commuters already aboard.
pub fn ride(id: i32, capacity: i64, occupied: usize) -> Ride {
    let ride_id = RideId::new(id);
    let commuters = (0..occupied)
        .map(|index| {
            let seat = i32::try_from(index).expect("small index") + 1;
            commuter(&format!("Seated {seat}"))
                .into_commuter(CommuterId::new(id * 100 + seat), ride_id)
        })
        .collect();
    Ride::new(RideDraft {
        id: ride_id,
        departure_location: "Leeds".to_owned(),
        destination: "York".to_owned(),
        departs_at: Utc
            .with_ymd_and_hms(2026, 3, 2, 8, 30, 0)
            .single()
            .expect("valid timestamp"),
        maximum_capacity: capacity,
        commuters,
        revision: INITIAL_RIDE_REVISION,
    })
    .expect("valid ride")
}

/// A join service over an in-memory store seeded with `rides`.
pub fn in_memory_service(
    rides: impl IntoIterator<Item = Ride>,
) -> (
    Arc<InMemoryRideRepository>,
    RideJoinService<InMemoryRideRepository>,
) {
    let repo = Arc::new(InMemoryRideRepository::with_rides(rides));
    let service = RideJoinService::new(Arc::clone(&repo));
    (repo, service)
}

/// In-memory store that yields to the scheduler after every lookup.
///
/// Joins polled together on one task all read the same revision before any
/// of them commits, so the losers hit a revision conflict and retry.
pub struct InterleavingRideRepository {
    inner: Arc<InMemoryRideRepository>,
    persists: AtomicUsize,
    conflicts: AtomicUsize,
}

impl InterleavingRideRepository {
    pub fn new(inner: Arc<InMemoryRideRepository>) -> Self {
        Self {
            inner,
            persists: AtomicUsize::new(0),
            conflicts: AtomicUsize::new(0),
        }
    }

    /// Commit attempts seen so far.
    pub fn persists(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }

    /// Commit attempts rejected for a stale revision.
    pub fn conflicts(&self) -> usize {
        self.conflicts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RideRepository for InterleavingRideRepository {
    async fn find_ride_with_commuters(
        &self,
        ride_id: RideId,
    ) -> Result<Option<Ride>, RideRepositoryError> {
        let found = self.inner.find_ride_with_commuters(ride_id).await;
        tokio::task::yield_now().await;
        found
    }

    async fn persist(&self, admission: &RideAdmission) -> Result<Commuter, RideRepositoryError> {
        self.persists.fetch_add(1, Ordering::SeqCst);
        let result = self.inner.persist(admission).await;
        if matches!(&result, Err(error) if error.is_conflict()) {
            self.conflicts.fetch_add(1, Ordering::SeqCst);
        }
        result
    }
}

/// A join service whose store interleaves joins polled on the same task.
pub fn interleaving_service(
    rides: impl IntoIterator<Item = Ride>,
) -> (
    Arc<InMemoryRideRepository>,
    Arc<InterleavingRideRepository>,
    RideJoinService<InterleavingRideRepository>,
) {
    let store = Arc::new(InMemoryRideRepository::with_rides(rides));
    let repo = Arc::new(InterleavingRideRepository::new(Arc::clone(&store)));
    let service = RideJoinService::new(Arc::clone(&repo));
    (store, repo, service)
}
