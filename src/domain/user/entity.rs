//! User entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::UserValidationError;

/// User identifier assigned by the record store.
///
/// The nil UUID is the "unset" sentinel carried by create payloads before the
/// store assigns an id. On the wire an empty string also means unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an id from its textual form
    pub fn parse(value: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId(value.to_string()))
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The unset sentinel
    pub fn unset() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Ok(Self::unset());
        }

        Self::parse(&value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0.to_string()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A friend entry, owned by its user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Friend {
    /// Caller-assigned, not unique
    pub id: i64,
    pub name: String,
}

/// Free-form profile fields of a user
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub is_active: bool,
    pub balance: String,
    pub age: String,
    pub name: String,
    pub gender: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub about: String,
    pub registered: String,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Vec<String>,
    pub friends: Vec<Friend>,
}

/// User record
///
/// The same shape is used for decoded payloads and stored records. Once
/// stored, `password` always holds a hash.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    id: UserId,
    password: String,
    #[serde(flatten)]
    profile: UserProfile,
    /// Mirrored into the artifact store
    data: String,
}

impl User {
    /// Create a user without an id
    pub fn new(password: impl Into<String>, profile: UserProfile, data: impl Into<String>) -> Self {
        Self {
            id: UserId::unset(),
            password: password.into(),
            profile,
            data: data.into(),
        }
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    // Mutators

    pub fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }

    /// Replace the stored credential with its hash
    pub fn set_password_hash(&mut self, hash: impl Into<String>) {
        self.password = hash.into();
    }

    /// Bind the user to its store-assigned id. Only record stores call this.
    pub(crate) fn assign_id(&mut self, id: UserId) {
        self.id = id;
    }
}
