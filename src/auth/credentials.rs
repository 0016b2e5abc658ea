use uuid::Uuid;

use super::{
    jwt::JwtKeys,
    password::{hash_password, verify_password},
};

/// Password hashing and token issuance used by the account service.
pub trait CredentialHelper: Send + Sync {
    fn hash(&self, plain: &str) -> anyhow::Result<String>;

    /// `Ok(false)` on mismatch, `Err` when the stored hash cannot be parsed.
    fn verify(&self, hash: &str, plain: &str) -> anyhow::Result<bool>;

    fn issue_token(&self, id: Uuid, email: &str, is_admin: bool) -> anyhow::Result<String>;
}

/// Argon2 hashes and HS256 JWTs.
pub struct Argon2Credentials {
    keys: JwtKeys,
}

impl Argon2Credentials {
    pub fn new(keys: JwtKeys) -> Self {
        Self { keys }
    }
}

impl CredentialHelper for Argon2Credentials {
    fn hash(&self, plain: &str) -> anyhow::Result<String> {
        hash_password(plain)
    }

    fn verify(&self, hash: &str, plain: &str) -> anyhow::Result<bool> {
        verify_password(hash, plain)
    }

    fn issue_token(&self, id: Uuid, email: &str, is_admin: bool) -> anyhow::Result<String> {
        self.keys.sign(id, email, is_admin)
    }
}
