//! Ride aggregate and the capacity rule that guards admission.
//!
//! A [`Ride`] owns the authoritative list of commuters that have joined it and
//! an optimistic-concurrency `revision`. Admission is a two-step protocol:
//! [`Ride::admit`] checks capacity and produces a [`RideAdmission`] pinned to
//! the observed revision, and a store commits that admission only if the
//! revision is still current.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Commuter, NewCommuter};

/// Message reported whenever a ride has no seats left.
pub const CAPACITY_EXCEEDED_MESSAGE: &str = "Maximum capacity reached";

/// Revision assigned to freshly created rides.
pub const INITIAL_RIDE_REVISION: u32 = 1;

/// Externally assigned ride identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RideId(i32);

impl RideId {
    #[rustfmt::skip]
    pub const fn new(value: i32) -> Self { Self(value) }

    /// Underlying integer value.
    #[rustfmt::skip]
    pub const fn get(self) -> i32 { self.0 }
}

impl fmt::Display for RideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RideId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Validation errors returned by [`Ride::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RideValidationError {
    #[error("maximum capacity must be a positive integer, got {capacity}")]
    NonPositiveCapacity { capacity: i64 },
    #[error("departure location must not be empty")]
    EmptyDepartureLocation,
    #[error("destination must not be empty")]
    EmptyDestination,
    #[error("destination must differ from the departure location")]
    SameEndpoints,
    #[error("ride holds {commuters} commuters but allows only {maximum_capacity}")]
    OverCapacity {
        commuters: usize,
        maximum_capacity: u32,
    },
    #[error("commuter {commuter_id} belongs to ride {found}, not ride {expected}")]
    ForeignCommuter {
        commuter_id: super::CommuterId,
        expected: RideId,
        found: RideId,
    },
}

/// Unvalidated ride fields as they arrive from seeds or storage rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideDraft {
    pub id: RideId,
    pub departure_location: String,
    pub destination: String,
    pub departs_at: DateTime<Utc>,
    pub maximum_capacity: i64,
    pub commuters: Vec<Commuter>,
    pub revision: u32,
}

/// Rejection returned when a ride has no remaining seats.
///
/// `Display` always renders [`CAPACITY_EXCEEDED_MESSAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Maximum capacity reached")]
pub struct CapacityExceeded {
    pub ride_id: RideId,
    pub maximum_capacity: u32,
}

/// Pending admission produced by [`Ride::admit`].
///
/// Stores commit it only while the ride is still at `expected_revision`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RideAdmission {
    ride_id: RideId,
    expected_revision: u32,
    commuter: NewCommuter,
}

impl RideAdmission {
    pub fn ride_id(&self) -> RideId {
        self.ride_id
    }

    pub fn expected_revision(&self) -> u32 {
        self.expected_revision
    }

    pub fn commuter(&self) -> &NewCommuter {
        &self.commuter
    }
}

/// A scheduled ride and the commuters that have joined it.
///
/// ## Invariants
/// - `maximum_capacity` is positive.
/// - `commuters.len() <= maximum_capacity`.
/// - every commuter's `ride_id` equals the ride's `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    id: RideId,
    departure_location: String,
    destination: String,
    departs_at: DateTime<Utc>,
    maximum_capacity: u32,
    commuters: Vec<Commuter>,
    revision: u32,
}

impl Ride {
    /// Validate a [`RideDraft`] into a [`Ride`].
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use rideshare::domain::{Ride, RideDraft, RideId};
    ///
    /// let ride = Ride::new(RideDraft {
    ///     id: RideId::new(1),
    ///     departure_location: "Station".into(),
    ///     destination: "Campus".into(),
    ///     departs_at: Utc::now(),
    ///     maximum_capacity: 4,
    ///     commuters: Vec::new(),
    ///     revision: 1,
    /// })
    /// .expect("valid ride");
    /// assert_eq!(ride.remaining_capacity(), 4);
    /// ```
    pub fn new(draft: RideDraft) -> Result<Self, RideValidationError> {
        let RideDraft {
            id,
            departure_location,
            destination,
            departs_at,
            maximum_capacity,
            commuters,
            revision,
        } = draft;

        let maximum_capacity = u32::try_from(maximum_capacity)
            .ok()
            .filter(|capacity| *capacity > 0)
            .ok_or(RideValidationError::NonPositiveCapacity {
                capacity: maximum_capacity,
            })?;

        let departure_location = departure_location.trim().to_owned();
        let destination = destination.trim().to_owned();
        if departure_location.is_empty() {
            return Err(RideValidationError::EmptyDepartureLocation);
        }
        if destination.is_empty() {
            return Err(RideValidationError::EmptyDestination);
        }
        if departure_location.to_lowercase() == destination.to_lowercase() {
            return Err(RideValidationError::SameEndpoints);
        }

        if commuters.len() > maximum_capacity as usize {
            return Err(RideValidationError::OverCapacity {
                commuters: commuters.len(),
                maximum_capacity,
            });
        }
        if let Some(stray) = commuters.iter().find(|commuter| commuter.ride_id != id) {
            return Err(RideValidationError::ForeignCommuter {
                commuter_id: stray.id,
                expected: id,
                found: stray.ride_id,
            });
        }

        Ok(Self {
            id,
            departure_location,
            destination,
            departs_at,
            maximum_capacity,
            commuters,
            revision,
        })
    }

    pub fn id(&self) -> RideId {
        self.id
    }

    pub fn departure_location(&self) -> &str {
        self.departure_location.as_str()
    }

    pub fn destination(&self) -> &str {
        self.destination.as_str()
    }

    pub fn departs_at(&self) -> DateTime<Utc> {
        self.departs_at
    }

    pub fn maximum_capacity(&self) -> u32 {
        self.maximum_capacity
    }

    pub fn commuters(&self) -> &[Commuter] {
        &self.commuters
    }

    /// Optimistic-concurrency version, bumped on every committed admission.
    pub fn revision(&self) -> u32 {
        self.revision
    }

    /// Seats still available.
    pub fn remaining_capacity(&self) -> u32 {
        let taken = u32::try_from(self.commuters.len()).unwrap_or(u32::MAX);
        self.maximum_capacity.saturating_sub(taken)
    }

    pub fn is_full(&self) -> bool {
        self.remaining_capacity() == 0
    }

    /// Check capacity and produce an admission pinned to the current revision.
    ///
    /// The ride itself is left untouched; the admission only takes effect once
    /// a store commits it and [`Ride::record_admission`] is applied.
    pub fn admit(&self, commuter: NewCommuter) -> Result<RideAdmission, CapacityExceeded> {
        if self.is_full() {
            return Err(CapacityExceeded {
                ride_id: self.id,
                maximum_capacity: self.maximum_capacity,
            });
        }
        Ok(RideAdmission {
            ride_id: self.id,
            expected_revision: self.revision,
            commuter,
        })
    }

    /// Apply a committed admission: append the commuter and bump the revision.
    pub fn record_admission(&mut self, commuter: Commuter) {
        self.commuters.push(commuter);
        self.revision = self.revision.saturating_add(1);
    }
}
