//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the ride and health endpoints plus the schema
//! wrappers from `inbound::http::schemas`. The document backs Swagger UI in
//! debug builds and is exported by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::rides::{
    JoinRideRequest, JoinRideResponse, RideCommuterBody, RideDetailsBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rideshare backend API",
        description = "Join scheduled rides subject to their maximum capacity."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::rides::join_ride,
        crate::inbound::http::rides::get_ride,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        JoinRideRequest,
        JoinRideResponse,
        RideDetailsBody,
        RideCommuterBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "rides", description = "Joining and inspecting rides"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
