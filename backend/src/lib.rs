//! Ride-sharing backend library.
//!
//! The binary in `main.rs` wires these modules into an actix-web server;
//! integration tests build the same pieces directly.

pub mod doc;
pub mod domain;
pub mod example_data;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
