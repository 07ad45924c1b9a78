use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The administrator credential. Provisioned once by `admin init`; the
/// server only ever reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
