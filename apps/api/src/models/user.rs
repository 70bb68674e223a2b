use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored user record. The password is a mock fixture value and never leaves the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRow {
    pub id: u64,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRow> for User {
    fn from(row: &UserRow) -> Self {
        User {
            id: row.id,
            email: row.email.clone(),
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            created_at: row.created_at,
        }
    }
}
