use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User record held by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,          // display name, at least 3 chars
    pub email: String,         // unique across the collection
    pub password_hash: String, // Argon2 PHC string, never the raw password
    pub id: Uuid,              // assigned once on creation
}

impl User {
    /// Fresh record with a newly generated id.
    pub fn new(fields: UserFields) -> Self {
        Self {
            name: fields.name,
            email: fields.email,
            password_hash: fields.password_hash,
            id: Uuid::new_v4(),
        }
    }

    pub fn apply(&mut self, fields: UserFields) {
        self.name = fields.name;
        self.email = fields.email;
        self.password_hash = fields.password_hash;
    }
}

/// Validated, hashed values for a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}
