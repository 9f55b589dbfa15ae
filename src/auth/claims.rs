use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload identifying the teacher the token was issued to.
///
/// Only identity travels in the token; profile data is always re-read from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: Uuid,     // internal teacher id
    pub user_id: i64,  // public numeric id
    pub email: String, // email at issuance
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
}
