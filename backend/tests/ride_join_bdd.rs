//! Behaviour tests for joining rides through the join service.
//!
//! Each scenario runs against the in-memory ride store with the real
//! `RideJoinService`, driving async calls through a per-world runtime.

use std::cell::RefCell;
use std::sync::Arc;

use rideshare::domain::ports::{JoinOutcome, RideJoinCommand, RideRepository};
use rideshare::domain::{RideId, RideJoinService};
use rideshare::outbound::memory::InMemoryRideRepository;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

mod support;

use support::rides::{InterleavingRideRepository, commuter, ride};

struct RideJoinWorld {
    runtime: Runtime,
    repo: RefCell<Arc<InMemoryRideRepository>>,
    outcomes: RefCell<Vec<JoinOutcome>>,
    conflicts: RefCell<usize>,
}

impl RideJoinWorld {
    fn new() -> Self {
        Self {
            runtime: Runtime::new().expect("tokio runtime"),
            repo: RefCell::new(Arc::new(InMemoryRideRepository::new())),
            outcomes: RefCell::new(Vec::new()),
            conflicts: RefCell::new(0),
        }
    }

    fn service(&self) -> RideJoinService<InMemoryRideRepository> {
        RideJoinService::new(Arc::clone(&self.repo.borrow()))
    }

    fn last_outcome(&self) -> JoinOutcome {
        self.outcomes
            .borrow()
            .last()
            .cloned()
            .expect("a join was attempted")
    }

    fn commuter_count(&self, ride_id: i32) -> usize {
        let repo = Arc::clone(&self.repo.borrow());
        self.runtime
            .block_on(repo.find_ride_with_commuters(RideId::new(ride_id)))
            .expect("lookup succeeds")
            .expect("ride exists")
            .commuters()
            .len()
    }
}

#[fixture]
fn world() -> RideJoinWorld {
    RideJoinWorld::new()
}

#[given("ride {id} with capacity {capacity} and {occupied} commuters")]
fn ride_with_capacity(world: &RideJoinWorld, id: i32, capacity: i64, occupied: usize) {
    *world.repo.borrow_mut() = Arc::new(InMemoryRideRepository::with_rides([ride(
        id, capacity, occupied,
    )]));
}

#[given("no rides")]
fn no_rides(world: &RideJoinWorld) {
    *world.repo.borrow_mut() = Arc::new(InMemoryRideRepository::new());
}

#[when("a commuter named \"{name}\" joins ride {id}")]
fn a_commuter_joins(world: &RideJoinWorld, name: String, id: i32) {
    let service = world.service();
    let outcome = world
        .runtime
        .block_on(service.join_ride(RideId::new(id), commuter(&name)));
    world.outcomes.borrow_mut().push(outcome);
}

#[when("two commuters join ride {id} at the same time")]
fn two_commuters_race(world: &RideJoinWorld, id: i32) {
    let repo = Arc::new(InterleavingRideRepository::new(Arc::clone(
        &world.repo.borrow(),
    )));
    let service = RideJoinService::new(Arc::clone(&repo));
    let (first, second) = world.runtime.block_on(async {
        futures::join!(
            service.join_ride(RideId::new(id), commuter("Ada Lovelace")),
            service.join_ride(RideId::new(id), commuter("Grace Hopper")),
        )
    });
    world.outcomes.borrow_mut().extend([first, second]);
    *world.conflicts.borrow_mut() = repo.conflicts();
}

#[then("the join succeeds")]
fn the_join_succeeds(world: &RideJoinWorld) {
    let outcome = world.last_outcome();
    assert!(matches!(outcome, JoinOutcome::Joined(_)), "{outcome:?}");
}

#[then("the join is rejected because the ride was not found")]
fn the_join_is_rejected_not_found(world: &RideJoinWorld) {
    let outcome = world.last_outcome();
    assert!(matches!(outcome, JoinOutcome::RideNotFound(_)), "{outcome:?}");
}

#[then("the join is rejected with \"{message}\"")]
fn the_join_is_rejected_with(world: &RideJoinWorld, message: String) {
    match world.last_outcome() {
        JoinOutcome::CapacityExceeded(rejection) => assert_eq!(rejection.to_string(), message),
        other => panic!("expected a capacity rejection, got {other:?}"),
    }
}

#[then("exactly one join succeeds and one is rejected for capacity")]
fn exactly_one_join_succeeds(world: &RideJoinWorld) {
    let outcomes = world.outcomes.borrow();
    let joined = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, JoinOutcome::Joined(_)))
        .count();
    let rejected = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, JoinOutcome::CapacityExceeded(_)))
        .count();
    assert_eq!((joined, rejected), (1, 1), "{outcomes:?}");
}

#[then("the losing join retried after {count} revision conflict")]
fn the_losing_join_retried(world: &RideJoinWorld, count: usize) {
    assert_eq!(*world.conflicts.borrow(), count);
}

#[then("ride {id} has {count} commuters")]
fn ride_has_commuters(world: &RideJoinWorld, id: i32, count: usize) {
    assert_eq!(world.commuter_count(id), count);
}

#[then("ride {id} still allows {capacity} commuters")]
fn ride_still_allows(world: &RideJoinWorld, id: i32, capacity: u32) {
    let repo = Arc::clone(&world.repo.borrow());
    let stored = world
        .runtime
        .block_on(repo.find_ride_with_commuters(RideId::new(id)))
        .expect("lookup succeeds")
        .expect("ride exists");
    assert_eq!(stored.maximum_capacity(), capacity);
}

#[then("the store holds {count} rides")]
fn the_store_holds(world: &RideJoinWorld, count: usize) {
    assert_eq!(world.repo.borrow().ride_count(), count);
}

#[scenario(
    path = "tests/features/ride_join.feature",
    name = "Joining a ride with free seats"
)]
fn joining_a_ride_with_free_seats(world: RideJoinWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/ride_join.feature",
    name = "Joining a ride that does not exist"
)]
fn joining_a_ride_that_does_not_exist(world: RideJoinWorld) {
    drop(world);
}

#[scenario(path = "tests/features/ride_join.feature", name = "Joining a full ride")]
fn joining_a_full_ride(world: RideJoinWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/ride_join.feature",
    name = "Two commuters race for the last seat"
)]
fn two_commuters_race_for_the_last_seat(world: RideJoinWorld) {
    drop(world);
}
