//! Commuter data model.
//!
//! A [`Commuter`] is a person admitted to exactly one ride. The back-reference
//! is a plain [`RideId`]; commuters never own or borrow their ride.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RideId;

/// Validation errors returned by [`NewCommuter::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommuterValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("phone must not be empty")]
    EmptyPhone,
    #[error("email must contain a single '@' with text on both sides")]
    InvalidEmail,
}

impl CommuterValidationError {
    /// Name of the payload field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPhone => "phone",
        }
    }
}

/// Store-assigned commuter identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommuterId(i32);

impl CommuterId {
    #[rustfmt::skip]
    pub const fn new(value: i32) -> Self { Self(value) }

    /// Underlying integer value.
    #[rustfmt::skip]
    pub const fn get(self) -> i32 { self.0 }
}

impl fmt::Display for CommuterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for CommuterId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// A commuter who has joined a ride.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commuter {
    pub id: CommuterId,
    pub ride_id: RideId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated commuter details awaiting admission to a ride.
///
/// Fields are trimmed on construction.
///
/// # Examples
/// ```
/// use rideshare::domain::NewCommuter;
///
/// let commuter = NewCommuter::new(" John Doe ", "john@example.com", "555-0100")
///     .expect("valid commuter");
/// assert_eq!(commuter.name(), "John Doe");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommuter {
    name: String,
    email: String,
    phone: String,
}

impl NewCommuter {
    /// Validate and construct a [`NewCommuter`].
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        phone: impl AsRef<str>,
    ) -> Result<Self, CommuterValidationError> {
        let name = name.as_ref().trim();
        let email = email.as_ref().trim();
        let phone = phone.as_ref().trim();

        if name.is_empty() {
            return Err(CommuterValidationError::EmptyName);
        }
        if email.is_empty() {
            return Err(CommuterValidationError::EmptyEmail);
        }
        if !is_plausible_email(email) {
            return Err(CommuterValidationError::InvalidEmail);
        }
        if phone.is_empty() {
            return Err(CommuterValidationError::EmptyPhone);
        }

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            phone: phone.to_owned(),
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn phone(&self) -> &str {
        self.phone.as_str()
    }

    /// Attach store-assigned identity, producing the persisted [`Commuter`].
    pub fn into_commuter(self, id: CommuterId, ride_id: RideId) -> Commuter {
        Commuter {
            id,
            ride_id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
