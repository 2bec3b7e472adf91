//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{commuters, rides};

/// Row struct for reading from the rides table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rides)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RideRow {
    pub id: i32,
    pub departure_location: String,
    pub destination: String,
    pub departs_at: DateTime<Utc>,
    pub maximum_capacity: i32,
    pub revision: i32,
}

/// Row struct for reading from the commuters table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = commuters)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommuterRow {
    pub id: i32,
    pub ride_id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Insertable struct for admitting a commuter.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = commuters)]
pub(crate) struct NewCommuterRow<'a> {
    pub ride_id: i32,
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}
