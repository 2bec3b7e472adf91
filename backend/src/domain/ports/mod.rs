//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod ride_details_query;
mod ride_join_command;
mod ride_repository;

#[cfg(test)]
pub use ride_details_query::MockRideDetailsQuery;
pub use ride_details_query::{FixtureRideDetailsQuery, RideDetails, RideDetailsQuery};
#[cfg(test)]
pub use ride_join_command::MockRideJoinCommand;
pub use ride_join_command::{FixtureRideJoinCommand, JoinOutcome, JoinedRide, RideJoinCommand};
#[cfg(test)]
pub use ride_repository::MockRideRepository;
pub use ride_repository::{FixtureRideRepository, RideRepository, RideRepositoryError};
