//! HTTP inbound adapter exposing the ride endpoints.

pub mod error;
pub mod health;
pub mod rides;
pub mod schemas;
pub mod state;
pub mod validation;

pub use error::ApiResult;
