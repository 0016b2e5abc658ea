use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload identifying an account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // account ID
    pub email: String,  // account email at issue time
    pub is_admin: bool, // admin capability
    pub iat: usize,     // issued at (unix timestamp)
    pub exp: usize,     // expires at (unix timestamp)
    pub iss: String,    // issuer
    pub aud: String,    // audience
}
