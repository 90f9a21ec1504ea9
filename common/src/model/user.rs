use serde::{Deserialize, Serialize};

/// A registered account. The raw password never leaves the registration or
/// login request; only its SHA-256 digest is stored.
///
/// Favorites are a separate many-to-many relation kept by the store, not a
/// field here, so that loading a user never drags the whole favorites set
/// along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub login: String,
    #[serde(skip_serializing)]
    pub hashed_pass: String,
    pub is_admin: bool,
}
