use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Teacher account row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Teacher {
    pub id: Uuid,                             // internal identity
    pub user_id: i64,                         // public sequential id
    pub name: String,
    pub surname: String,
    pub speciality: Option<String>,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,                // Argon2 hash, never exposed
    pub experience: Option<String>,
    pub about: Option<String>,
    pub price: Option<f64>,
    pub phone: Option<String>,
    pub date_of_birth: Option<OffsetDateTime>,
    pub available: Option<bool>,
    pub profile_image: Option<String>,        // stored blob path
    pub created_at: OffsetDateTime,
}

/// Everything needed to insert a teacher; `user_id` and `created_at` come from the store.
#[derive(Debug, Clone)]
pub struct NewTeacher {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub speciality: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub experience: Option<String>,
    pub about: Option<String>,
    pub price: Option<f64>,
    pub phone: Option<String>,
    pub date_of_birth: Option<OffsetDateTime>,
    pub available: Option<bool>,
    pub profile_image: Option<String>,
}
