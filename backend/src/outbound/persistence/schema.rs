//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Scheduled rides. Identifiers are assigned externally.
    rides (id) {
        id -> Int4,
        departure_location -> Text,
        destination -> Text,
        departs_at -> Timestamptz,
        /// Always positive (enforced by a CHECK constraint).
        maximum_capacity -> Int4,
        /// Optimistic-concurrency version; starts at 1.
        revision -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Commuters admitted to a ride.
    commuters (id) {
        id -> Int4,
        ride_id -> Int4,
        name -> Text,
        email -> Text,
        phone -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(commuters -> rides (ride_id));
diesel::allow_tables_to_appear_in_same_query!(rides, commuters);
