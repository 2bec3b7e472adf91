//! Builders for HTTP state ports backed by the configured ride store.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use rideshare::domain::ports::{RideDetailsQuery, RideJoinCommand, RideRepository};
use rideshare::domain::{JoinRetryPolicy, RideDetailsService, RideJoinService};
use rideshare::inbound::http::state::HttpState;
use rideshare::outbound::memory::InMemoryRideRepository;
use rideshare::outbound::persistence::DieselRideRepository;

use super::ServerConfig;

/// Wire the join command and details query over one shared repository.
fn build_ride_ports<R>(
    repo: Arc<R>,
    retry_policy: JoinRetryPolicy,
) -> (Arc<dyn RideJoinCommand>, Arc<dyn RideDetailsQuery>)
where
    R: RideRepository + 'static,
{
    let ride_join = Arc::new(RideJoinService::with_retry_policy(
        Arc::clone(&repo),
        retry_policy,
    ));
    let ride_details = Arc::new(RideDetailsService::new(repo));
    (ride_join, ride_details)
}

/// Build HTTP state, choosing PostgreSQL when a pool is configured and the
/// seeded in-memory store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (ride_join, ride_details) = match &config.db_pool {
        Some(pool) => {
            info!(store = "postgres", "ride store selected");
            build_ride_ports(
                Arc::new(DieselRideRepository::new(pool.clone())),
                config.retry_policy,
            )
        }
        None => {
            info!(
                store = "memory",
                seeded_rides = config.seed_rides.len(),
                "ride store selected"
            );
            build_ride_ports(
                Arc::new(InMemoryRideRepository::with_rides(
                    config.seed_rides.iter().cloned(),
                )),
                config.retry_policy,
            )
        }
    };

    web::Data::new(HttpState::new(ride_join, ride_details))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::SocketAddr;

    use chrono::{TimeZone, Utc};
    use rideshare::domain::{INITIAL_RIDE_REVISION, NewCommuter, Ride, RideDraft, RideId};
    use rideshare::domain::ports::JoinOutcome;

    fn seed_ride(id: i32, capacity: i64) -> Ride {
        Ride::new(RideDraft {
            id: RideId::new(id),
            departure_location: "Leeds".to_owned(),
            destination: "York".to_owned(),
            departs_at: Utc
                .with_ymd_and_hms(2026, 3, 2, 8, 30, 0)
                .single()
                .expect("valid timestamp"),
            maximum_capacity: capacity,
            commuters: Vec::new(),
            revision: INITIAL_RIDE_REVISION,
        })
        .expect("valid ride")
    }

    #[tokio::test]
    async fn in_memory_state_serves_seeded_rides() {
        let addr: SocketAddr = "127.0.0.1:0".parse().expect("literal addr");
        let config = ServerConfig::new(addr).with_seed_rides(vec![seed_ride(1, 1)]);
        let state = build_http_state(&config);

        let commuter =
            NewCommuter::new("John Doe", "john@example.com", "555-0100").expect("valid commuter");
        let outcome = state.ride_join.join_ride(RideId::new(1), commuter).await;
        assert!(matches!(outcome, JoinOutcome::Joined(_)));

        let details = state
            .ride_details
            .ride_details(RideId::new(1))
            .await
            .expect("ride exists");
        assert!(details.is_full);
    }
}
