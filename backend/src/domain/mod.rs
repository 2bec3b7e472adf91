//! Domain primitives, aggregates and services.
//!
//! Purpose: define the ride-sharing entities and the capacity-bounded join
//! protocol independently of HTTP and storage. Adapters depend on this module;
//! it depends on neither.
//!
//! Public surface:
//! - [`Ride`], [`RideId`], [`RideAdmission`]: the ride aggregate and its
//!   revision-pinned admission.
//! - [`Commuter`], [`NewCommuter`]: stored and pending commuters.
//! - [`RideJoinService`], [`RideDetailsService`]: driving port
//!   implementations.
//! - [`Error`], [`ErrorCode`], [`TraceId`]: transport-agnostic failures and
//!   request correlation.

pub mod commuter;
pub mod error;
pub mod ports;
pub mod ride;
pub mod ride_details_service;
pub mod ride_join_service;
pub mod trace_id;

pub use self::commuter::{Commuter, CommuterId, CommuterValidationError, NewCommuter};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ride::{
    CAPACITY_EXCEEDED_MESSAGE, CapacityExceeded, INITIAL_RIDE_REVISION, Ride, RideAdmission,
    RideDraft, RideId, RideValidationError,
};
pub use self::ride_details_service::RideDetailsService;
pub use self::ride_join_service::{DEFAULT_JOIN_MAX_ATTEMPTS, JoinRetryPolicy, RideJoinService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
