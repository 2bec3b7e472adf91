//! Ride HTTP handlers.
//!
//! ```text
//! POST /rides/{ride_id}/join
//! GET  /rides/{ride_id}
//! ```

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{JoinedRide, RideDetails};
use crate::domain::{Commuter, NewCommuter, RideId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    commuter_validation_error, json_payload_error, missing_field_error, parse_ride_id,
};

#[derive(Debug, Deserialize)]
struct RidePath {
    ride_id: String,
}

/// Request payload for joining a ride.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinRideRequest {
    #[schema(example = "John Doe")]
    pub name: Option<String>,
    #[schema(example = "john@example.com")]
    pub email: Option<String>,
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
}

/// Body returned alongside the `303 See Other` join redirect.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinRideResponse {
    pub ride_id: i32,
    pub commuter_id: i32,
    pub remaining_capacity: u32,
}

impl From<&JoinedRide> for JoinRideResponse {
    fn from(value: &JoinedRide) -> Self {
        Self {
            ride_id: value.ride_id.get(),
            commuter_id: value.commuter.id.get(),
            remaining_capacity: value.remaining_capacity,
        }
    }
}

/// Commuter entry in ride details. Contact details are never exposed.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RideCommuterBody {
    pub commuter_id: i32,
    pub name: String,
}

impl From<&Commuter> for RideCommuterBody {
    fn from(value: &Commuter) -> Self {
        Self {
            commuter_id: value.id.get(),
            name: value.name.clone(),
        }
    }
}

/// Ride details payload.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RideDetailsBody {
    pub ride_id: i32,
    pub departure_location: String,
    pub destination: String,
    /// RFC 3339 departure timestamp.
    pub departs_at: String,
    pub maximum_capacity: u32,
    pub remaining_capacity: u32,
    pub is_full: bool,
    pub commuters: Vec<RideCommuterBody>,
}

impl From<RideDetails> for RideDetailsBody {
    fn from(value: RideDetails) -> Self {
        let RideDetails {
            ride,
            remaining_capacity,
            is_full,
        } = value;
        Self {
            ride_id: ride.id().get(),
            departure_location: ride.departure_location().to_owned(),
            destination: ride.destination().to_owned(),
            departs_at: ride.departs_at().to_rfc3339(),
            maximum_capacity: ride.maximum_capacity(),
            remaining_capacity,
            is_full,
            commuters: ride.commuters().iter().map(RideCommuterBody::from).collect(),
        }
    }
}

/// JSON extractor settings that answer unreadable bodies with `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|error, _req| json_payload_error(&error).into())
}

/// Location of the ride details resource.
pub fn ride_location(ride_id: RideId) -> String {
    format!("/rides/{ride_id}")
}

fn parse_join_request(payload: JoinRideRequest) -> ApiResult<NewCommuter> {
    let name = payload.name.ok_or_else(|| missing_field_error("name"))?;
    let email = payload.email.ok_or_else(|| missing_field_error("email"))?;
    let phone = payload.phone.ok_or_else(|| missing_field_error("phone"))?;
    NewCommuter::new(name, email, phone).map_err(commuter_validation_error)
}

/// Join a ride, subject to its maximum capacity.
#[utoipa::path(
    post,
    path = "/rides/{ride_id}/join",
    request_body = JoinRideRequest,
    params(
        ("ride_id" = i32, Path, description = "Ride identifier")
    ),
    responses(
        (
            status = 303,
            description = "Commuter joined; follow Location to the ride",
            headers(("Location" = String, description = "Ride details resource")),
            body = JoinRideResponse
        ),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Ride not found", body = ErrorSchema),
        (status = 409, description = "Maximum capacity reached", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Ride store unavailable", body = ErrorSchema)
    ),
    tags = ["rides"],
    operation_id = "joinRide"
)]
#[post("/rides/{ride_id}/join")]
pub async fn join_ride(
    state: web::Data<HttpState>,
    path: web::Path<RidePath>,
    payload: web::Json<JoinRideRequest>,
) -> ApiResult<HttpResponse> {
    let ride_id = parse_ride_id(&path.ride_id)?;
    let commuter = parse_join_request(payload.into_inner())?;

    let joined = state.ride_join.join_ride(ride_id, commuter).await.into_result()?;

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, ride_location(joined.ride_id)))
        .json(JoinRideResponse::from(&joined)))
}

/// Fetch a ride with its commuters.
#[utoipa::path(
    get,
    path = "/rides/{ride_id}",
    params(
        ("ride_id" = i32, Path, description = "Ride identifier")
    ),
    responses(
        (status = 200, description = "Ride details", body = RideDetailsBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Ride not found", body = ErrorSchema),
        (status = 503, description = "Ride store unavailable", body = ErrorSchema)
    ),
    tags = ["rides"],
    operation_id = "getRide"
)]
#[get("/rides/{ride_id}")]
pub async fn get_ride(
    state: web::Data<HttpState>,
    path: web::Path<RidePath>,
) -> ApiResult<web::Json<RideDetailsBody>> {
    let ride_id = parse_ride_id(&path.ride_id)?;
    let details = state.ride_details.ride_details(ride_id).await?;
    Ok(web::Json(RideDetailsBody::from(details)))
}

#[cfg(test)]
#[path = "rides_tests.rs"]
mod tests;
