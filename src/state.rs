use std::sync::Arc;

use crate::{
    accounts::{repo::AccountStore, services::AccountService},
    auth::{
        credentials::{Argon2Credentials, CredentialHelper},
        jwt::JwtKeys,
    },
    config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub keys: JwtKeys,
    pub accounts: AccountService,
}

impl AppState {
    /// Production wiring: Argon2 hashing and JWTs signed with the configured secret.
    pub fn new(config: &AppConfig, store: Arc<dyn AccountStore>) -> Self {
        let keys = JwtKeys::from(&config.jwt);
        let credentials = Arc::new(Argon2Credentials::new(keys.clone()));
        Self::from_parts(keys, store, credentials)
    }

    pub fn from_parts(
        keys: JwtKeys,
        store: Arc<dyn AccountStore>,
        credentials: Arc<dyn CredentialHelper>,
    ) -> Self {
        Self {
            keys,
            accounts: AccountService::new(store, credentials),
        }
    }
}
