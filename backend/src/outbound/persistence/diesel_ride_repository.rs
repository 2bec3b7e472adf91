//! PostgreSQL-backed `RideRepository` implementation using Diesel ORM.
//!
//! An admission commit is one transaction: a revision-guarded
//! `UPDATE rides SET revision = revision + 1` followed by the commuter insert.
//! When the guard matches no row nothing is written and the transaction rolls
//! back with a typed conflict.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{RideRepository, RideRepositoryError};
use crate::domain::{Commuter, CommuterId, Ride, RideAdmission, RideDraft, RideId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CommuterRow, NewCommuterRow, RideRow};
use super::pool::{DbPool, PoolError};
use super::schema::{commuters, rides};

/// Diesel-backed implementation of the `RideRepository` port.
#[derive(Clone)]
pub struct DieselRideRepository {
    pool: DbPool,
}

impl DieselRideRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use rideshare::outbound::persistence::{DbPool, DieselRideRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/rides")).await?;
    /// let repo = DieselRideRepository::new(pool);
    /// # let _ = repo;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RideRepositoryError {
    map_basic_pool_error(error, RideRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RideRepositoryError {
    map_basic_diesel_error(
        error,
        RideRepositoryError::query,
        RideRepositoryError::connection,
    )
}

/// Failure inside the commit transaction.
enum CommitError {
    Diesel(diesel::result::Error),
    Rejected(RideRepositoryError),
}

impl From<diesel::result::Error> for CommitError {
    fn from(value: diesel::result::Error) -> Self {
        Self::Diesel(value)
    }
}

impl From<CommitError> for RideRepositoryError {
    fn from(value: CommitError) -> Self {
        match value {
            CommitError::Diesel(error) => map_diesel_error(error),
            CommitError::Rejected(error) => error,
        }
    }
}

fn revision_from_db(ride_id: i32, revision: i32) -> Result<u32, RideRepositoryError> {
    u32::try_from(revision).map_err(|_| {
        RideRepositoryError::query(format!("ride {ride_id} has negative revision {revision}"))
    })
}

fn revision_for_db(revision: u32) -> Result<i32, RideRepositoryError> {
    i32::try_from(revision)
        .map_err(|_| RideRepositoryError::query(format!("revision {revision} out of range")))
}

fn row_to_commuter(row: CommuterRow) -> Commuter {
    Commuter {
        id: CommuterId::new(row.id),
        ride_id: RideId::new(row.ride_id),
        name: row.name,
        email: row.email,
        phone: row.phone,
    }
}

fn rows_to_ride(ride: RideRow, commuter_rows: Vec<CommuterRow>) -> Result<Ride, RideRepositoryError> {
    let revision = revision_from_db(ride.id, ride.revision)?;
    let ride_id = ride.id;
    Ride::new(RideDraft {
        id: RideId::new(ride.id),
        departure_location: ride.departure_location,
        destination: ride.destination,
        departs_at: ride.departs_at,
        maximum_capacity: i64::from(ride.maximum_capacity),
        commuters: commuter_rows.into_iter().map(row_to_commuter).collect(),
        revision,
    })
    .map_err(|err| RideRepositoryError::query(format!("invalid ride row {ride_id}: {err}")))
}

#[async_trait]
impl RideRepository for DieselRideRepository {
    async fn find_ride_with_commuters(
        &self,
        ride_id: RideId,
    ) -> Result<Option<Ride>, RideRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id = ride_id.get();

        let rows = conn
            .transaction(|conn| {
                async move {
                    let ride: Option<RideRow> = rides::table
                        .filter(rides::id.eq(id))
                        .select(RideRow::as_select())
                        .first(conn)
                        .await
                        .optional()?;
                    let Some(ride) = ride else {
                        return Ok(None);
                    };

                    let commuter_rows: Vec<CommuterRow> = commuters::table
                        .filter(commuters::ride_id.eq(id))
                        .order(commuters::id.asc())
                        .select(CommuterRow::as_select())
                        .load(conn)
                        .await?;

                    Ok::<_, diesel::result::Error>(Some((ride, commuter_rows)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        rows.map(|(ride, commuter_rows)| rows_to_ride(ride, commuter_rows))
            .transpose()
    }

    async fn persist(&self, admission: &RideAdmission) -> Result<Commuter, RideRepositoryError> {
        let ride_id = admission.ride_id();
        let expected = admission.expected_revision();
        let expected_db = revision_for_db(expected)?;
        let id = ride_id.get();
        let commuter = admission.commuter();
        let new_row = NewCommuterRow {
            ride_id: id,
            name: commuter.name(),
            email: commuter.email(),
            phone: commuter.phone(),
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction(|conn| {
                async move {
                    let bumped = diesel::update(
                        rides::table.filter(rides::id.eq(id).and(rides::revision.eq(expected_db))),
                    )
                    .set((
                        rides::revision.eq(rides::revision + 1),
                        rides::updated_at.eq(Utc::now()),
                    ))
                    .execute(conn)
                    .await?;

                    if bumped == 0 {
                        let actual: Option<i32> = rides::table
                            .filter(rides::id.eq(id))
                            .select(rides::revision)
                            .first(conn)
                            .await
                            .optional()?;
                        let rejection = match actual {
                            Some(actual) => match revision_from_db(id, actual) {
                                Ok(actual) => {
                                    RideRepositoryError::revision_mismatch(expected, actual)
                                }
                                Err(error) => error,
                            },
                            None => RideRepositoryError::ride_missing(ride_id),
                        };
                        return Err(CommitError::Rejected(rejection));
                    }

                    let row: CommuterRow = diesel::insert_into(commuters::table)
                        .values(&new_row)
                        .returning(CommuterRow::as_returning())
                        .get_result(conn)
                        .await?;
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(RideRepositoryError::from)?;

        Ok(row_to_commuter(row))
    }
}
