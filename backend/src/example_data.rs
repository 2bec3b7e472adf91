//! Example ride data for running the server without a database.
//!
//! Seeds are a JSON array of rides, each optionally carrying commuters. Every
//! entry is validated through [`Ride::new`] so a seed file can never smuggle
//! an over-capacity ride into the in-memory store.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::domain::{
    CommuterId, CommuterValidationError, INITIAL_RIDE_REVISION, NewCommuter, Ride, RideDraft,
    RideId, RideValidationError,
};

/// Errors returned while loading ride seeds.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Seed file could not be read.
    #[error("failed to read ride seeds at {path}: {source}")]
    Read {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Seed file is not valid JSON of the expected shape.
    #[error("failed to parse ride seeds at {path}: {source}")]
    Parse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A seeded ride failed validation.
    #[error("ride seed {ride_id} is invalid: {source}")]
    InvalidRide {
        /// Offending ride.
        ride_id: RideId,
        /// Validation failure.
        #[source]
        source: RideValidationError,
    },
    /// A seeded commuter failed validation.
    #[error("commuter seed {commuter_id} on ride {ride_id} is invalid: {source}")]
    InvalidCommuter {
        /// Ride the commuter was seeded on.
        ride_id: RideId,
        /// Offending commuter.
        commuter_id: CommuterId,
        /// Validation failure.
        #[source]
        source: CommuterValidationError,
    },
    /// Two seeds share a ride identifier.
    #[error("ride seed {ride_id} appears more than once")]
    DuplicateRide {
        /// Repeated identifier.
        ride_id: RideId,
    },
    /// Two seeded commuters share an identifier, possibly across rides.
    #[error("commuter seed {commuter_id} appears more than once")]
    DuplicateCommuter {
        /// Repeated identifier.
        commuter_id: CommuterId,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RideSeed {
    id: i32,
    departure_location: String,
    destination: String,
    departs_at: DateTime<Utc>,
    maximum_capacity: i64,
    #[serde(default)]
    commuters: Vec<CommuterSeed>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CommuterSeed {
    id: i32,
    name: String,
    email: String,
    phone: String,
}

impl RideSeed {
    fn into_ride(self) -> Result<Ride, SeedError> {
        let ride_id = RideId::new(self.id);
        let commuters = self
            .commuters
            .into_iter()
            .map(|seed| {
                let commuter_id = CommuterId::new(seed.id);
                NewCommuter::new(seed.name, seed.email, seed.phone)
                    .map(|commuter| commuter.into_commuter(commuter_id, ride_id))
                    .map_err(|source| SeedError::InvalidCommuter {
                        ride_id,
                        commuter_id,
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ride::new(RideDraft {
            id: ride_id,
            departure_location: self.departure_location,
            destination: self.destination,
            departs_at: self.departs_at,
            maximum_capacity: self.maximum_capacity,
            commuters,
            revision: INITIAL_RIDE_REVISION,
        })
        .map_err(|source| SeedError::InvalidRide { ride_id, source })
    }
}

/// Default seed file shipped with the crate.
pub fn default_seed_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("rides.json")
}

/// Parse ride seeds from a JSON document.
///
/// `origin` is only used to label errors.
///
/// # Examples
/// ```
/// use std::path::Path;
///
/// use rideshare::example_data::parse_ride_seeds;
///
/// let json = r#"[{
///     "id": 1,
///     "departureLocation": "Leeds",
///     "destination": "York",
///     "departsAt": "2026-03-02T08:30:00Z",
///     "maximumCapacity": 4
/// }]"#;
/// let rides = parse_ride_seeds(json, Path::new("inline")).expect("valid seeds");
/// assert_eq!(rides[0].remaining_capacity(), 4);
/// ```
pub fn parse_ride_seeds(json: &str, origin: &Path) -> Result<Vec<Ride>, SeedError> {
    let seeds: Vec<RideSeed> = serde_json::from_str(json).map_err(|source| SeedError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;

    let mut seen_rides = HashSet::with_capacity(seeds.len());
    let mut seen_commuters = HashSet::new();
    seeds
        .into_iter()
        .map(|seed| {
            let ride = seed.into_ride()?;
            if !seen_rides.insert(ride.id()) {
                return Err(SeedError::DuplicateRide { ride_id: ride.id() });
            }
            if let Some(commuter) = ride
                .commuters()
                .iter()
                .find(|commuter| !seen_commuters.insert(commuter.id))
            {
                return Err(SeedError::DuplicateCommuter {
                    commuter_id: commuter.id,
                });
            }
            Ok(ride)
        })
        .collect()
}

/// Read and validate ride seeds from `path`.
pub fn load_ride_seeds(path: &Path) -> Result<Vec<Ride>, SeedError> {
    let json = read_seed_file(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let rides = parse_ride_seeds(&json, path)?;
    info!(path = %path.display(), rides = rides.len(), "ride seeds loaded");
    Ok(rides)
}

fn read_seed_file(path: &Path) -> std::io::Result<String> {
    let file_name = path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        )
    })?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    dir.read_to_string(file_name)
}

#[cfg(test)]
mod tests {
    //! Coverage for seed parsing and validation.

    use super::*;
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    const ONE_RIDE: &str = r#"[{
        "id": 3,
        "departureLocation": "Leeds",
        "destination": "York",
        "departsAt": "2026-03-02T08:30:00Z",
        "maximumCapacity": 2,
        "commuters": [
            { "id": 11, "name": "Ada", "email": "ada@example.com", "phone": "0113 000 0000" }
        ]
    }]"#;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write seeds");
        file
    }

    #[rstest]
    fn loads_rides_from_disk() {
        let file = write_temp(ONE_RIDE);
        let rides = load_ride_seeds(file.path()).expect("seeds load");

        assert_eq!(rides.len(), 1);
        let ride = &rides[0];
        assert_eq!(ride.id(), RideId::new(3));
        assert_eq!(ride.revision(), INITIAL_RIDE_REVISION);
        assert_eq!(ride.remaining_capacity(), 1);
        assert_eq!(ride.commuters()[0].ride_id, RideId::new(3));
    }

    #[rstest]
    fn shipped_fixture_is_valid() {
        let rides = load_ride_seeds(&default_seed_path()).expect("fixture loads");
        assert!(!rides.is_empty());
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = load_ride_seeds(&dir.path().join("absent.json")).expect_err("missing file");
        assert!(matches!(err, SeedError::Read { .. }));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"id": 1}"#)]
    #[case(r#"[{"id": 1, "destination": "York"}]"#)]
    fn malformed_documents_are_parse_errors(#[case] json: &str) {
        let err = parse_ride_seeds(json, Path::new("inline")).expect_err("parse failure");
        assert!(matches!(err, SeedError::Parse { .. }));
    }

    #[rstest]
    fn over_capacity_seed_is_rejected() {
        let json = r#"[{
            "id": 1,
            "departureLocation": "Leeds",
            "destination": "York",
            "departsAt": "2026-03-02T08:30:00Z",
            "maximumCapacity": 1,
            "commuters": [
                { "id": 1, "name": "Ada", "email": "ada@example.com", "phone": "1" },
                { "id": 2, "name": "Bob", "email": "bob@example.com", "phone": "2" }
            ]
        }]"#;
        let err = parse_ride_seeds(json, Path::new("inline")).expect_err("over capacity");
        assert!(matches!(
            err,
            SeedError::InvalidRide {
                source: RideValidationError::OverCapacity { .. },
                ..
            }
        ));
    }

    #[rstest]
    fn invalid_commuter_seed_is_rejected() {
        let json = r#"[{
            "id": 1,
            "departureLocation": "Leeds",
            "destination": "York",
            "departsAt": "2026-03-02T08:30:00Z",
            "maximumCapacity": 2,
            "commuters": [
                { "id": 1, "name": "Ada", "email": "not-an-email", "phone": "1" }
            ]
        }]"#;
        let err = parse_ride_seeds(json, Path::new("inline")).expect_err("bad email");
        assert!(matches!(
            err,
            SeedError::InvalidCommuter {
                source: CommuterValidationError::InvalidEmail,
                ..
            }
        ));
    }

    #[rstest]
    fn duplicate_ride_ids_are_rejected() {
        let ride = r#"{
            "id": 1,
            "departureLocation": "Leeds",
            "destination": "York",
            "departsAt": "2026-03-02T08:30:00Z",
            "maximumCapacity": 2
        }"#;
        let json = format!("[{ride},{ride}]");
        let err = parse_ride_seeds(&json, Path::new("inline")).expect_err("duplicate");
        assert!(matches!(err, SeedError::DuplicateRide { ride_id } if ride_id == RideId::new(1)));
    }

    #[rstest]
    #[case::across_rides(
        r#"[{"id": 2, "departureLocation": "Leeds", "destination": "York",
              "departsAt": "2026-03-02T08:30:00Z", "maximumCapacity": 2,
              "commuters": [{"id": 1, "name": "Ada", "email": "ada@example.com", "phone": "1"}]},
             {"id": 3, "departureLocation": "York", "destination": "Leeds",
              "departsAt": "2026-03-02T17:30:00Z", "maximumCapacity": 2,
              "commuters": [{"id": 1, "name": "Bob", "email": "bob@example.com", "phone": "2"}]}]"#
    )]
    #[case::within_a_ride(
        r#"[{"id": 2, "departureLocation": "Leeds", "destination": "York",
              "departsAt": "2026-03-02T08:30:00Z", "maximumCapacity": 3,
              "commuters": [{"id": 4, "name": "Ada", "email": "ada@example.com", "phone": "1"},
                            {"id": 4, "name": "Bob", "email": "bob@example.com", "phone": "2"}]}]"#
    )]
    fn duplicate_commuter_ids_are_rejected(#[case] json: &str) {
        let err = parse_ride_seeds(json, Path::new("inline")).expect_err("duplicate commuter");
        assert!(matches!(err, SeedError::DuplicateCommuter { .. }), "{err:?}");
    }
}
