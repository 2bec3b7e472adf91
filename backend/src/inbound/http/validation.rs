//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every failure becomes `400 invalid_request` with `details` naming the
//! offending field and a machine-readable `code`.

use actix_web::error::JsonPayloadError;
use serde_json::json;

use crate::domain::{CommuterValidationError, Error, RideId};

/// Body rejected by the JSON extractor before any field validation ran.
pub(crate) fn json_payload_error(error: &JsonPayloadError) -> Error {
    Error::invalid_request("request body must be a JSON object").with_details(json!({
        "code": "malformed_body",
        "reason": error.to_string(),
    }))
}

pub(crate) fn missing_field_error(field: &'static str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": "missing_field",
    }))
}

pub(crate) fn commuter_validation_error(error: CommuterValidationError) -> Error {
    let code = match error {
        CommuterValidationError::InvalidEmail => "invalid_email",
        CommuterValidationError::EmptyName
        | CommuterValidationError::EmptyEmail
        | CommuterValidationError::EmptyPhone => "empty_field",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": error.field(),
        "code": code,
    }))
}

/// Parse a ride identifier path segment.
pub(crate) fn parse_ride_id(raw: &str) -> Result<RideId, Error> {
    raw.trim().parse::<i32>().map(RideId::new).map_err(|_| {
        Error::invalid_request("ride id must be an integer").with_details(json!({
            "field": "rideId",
            "value": raw,
            "code": "invalid_ride_id",
        }))
    })
}
