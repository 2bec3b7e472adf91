//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and depend only on driving ports, so
//! they can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{RideDetailsQuery, RideJoinCommand};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub ride_join: Arc<dyn RideJoinCommand>,
    pub ride_details: Arc<dyn RideDetailsQuery>,
}

impl HttpState {
    pub fn new(ride_join: Arc<dyn RideJoinCommand>, ride_details: Arc<dyn RideDetailsQuery>) -> Self {
        Self {
            ride_join,
            ride_details,
        }
    }
}
