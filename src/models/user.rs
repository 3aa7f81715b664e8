use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A registered account.
///
/// `password` holds the vault-produced stored secret
/// (`<base64 ciphertext>$<base64 IV>`), never the clear text. It is excluded
/// from serialization so it cannot leak through a response body or a debug
/// dump of a JSON value.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
}
