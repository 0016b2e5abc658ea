use std::sync::Arc;

use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{LoginRequest, PatchRequest, SignupRequest},
    policy::{can_delete, can_list, can_view, Caller},
    repo::AccountStore,
    repo_types::{Account, AccountStatus, AccountSummary, NewAccount, ProfilePatch, ProfileUpdate},
    validation,
};
use crate::{
    auth::credentials::CredentialHelper,
    error::{AccountError, StoreError},
};

const ADMIN_ONLY: &str = "Unauthorized!, Admin only route";
const NO_ACCESS: &str = "Hmmm...you do not have access";
const NOT_FOUND: &str = "Not Found";
const USER_NOT_FOUND: &str = "User not Found";

/// Result of a successful signup.
#[derive(Debug)]
pub struct SignedUp {
    pub account: Account,
    pub token: String,
}

/// Account lifecycle: signup, login, list, fetch-one, patch, delete.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
    credentials: Arc<dyn CredentialHelper>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>, credentials: Arc<dyn CredentialHelper>) -> Self {
        Self { store, credentials }
    }

    pub async fn create_account(&self, input: SignupRequest) -> Result<SignedUp, AccountError> {
        let input = validation::signup(input)?;
        let password_hash = self
            .credentials
            .hash(&input.password)
            .map_err(AccountError::Transient)?;

        let account = self
            .store
            .insert(NewAccount {
                email: input.email,
                first_name: input.first_name,
                last_name: input.last_name,
                address: input.address,
                password_hash,
                status: AccountStatus::Pending,
                is_admin: false,
                created_on: OffsetDateTime::now_utc(),
            })
            .await
            .map_err(|e| match e {
                StoreError::UniqueViolation => {
                    warn!("email already registered");
                    AccountError::Conflict
                }
                other => other.into(),
            })?;

        let token = self
            .credentials
            .issue_token(account.id, &account.email, account.is_admin)
            .map_err(AccountError::Transient)?;

        info!(user_id = %account.id, "account created");
        Ok(SignedUp { account, token })
    }

    /// Returns a bearer token for valid credentials.
    pub async fn authenticate(&self, input: LoginRequest) -> Result<String, AccountError> {
        let input = validation::login(input)?;
        let row = self
            .store
            .find_by_email(&input.email)
            .await?
            .ok_or_else(|| {
                warn!("login for unknown email");
                AccountError::NotFound(USER_NOT_FOUND)
            })?;

        let ok = self
            .credentials
            .verify(&row.password_hash, &input.password)
            .map_err(AccountError::Transient)?;
        if !ok {
            warn!(user_id = %row.id, "login invalid password");
            return Err(AccountError::Auth);
        }

        let token = self
            .credentials
            .issue_token(row.id, &row.email, row.is_admin)
            .map_err(AccountError::Transient)?;
        info!(user_id = %row.id, "user logged in");
        Ok(token)
    }

    pub async fn list_accounts(&self, caller: &Caller) -> Result<Vec<AccountSummary>, AccountError> {
        if !can_list(caller) {
            warn!(caller = %caller.id, "non-admin tried to list accounts");
            return Err(AccountError::Forbidden(ADMIN_ONLY));
        }
        Ok(self.store.list().await?)
    }

    pub async fn get_account(
        &self,
        caller: &Caller,
        target: Uuid,
    ) -> Result<AccountSummary, AccountError> {
        let account = self
            .store
            .find_by_id(target)
            .await?
            .ok_or(AccountError::NotFound(NOT_FOUND))?;
        if !can_view(caller, target) {
            warn!(caller = %caller.id, %target, "account read denied");
            return Err(AccountError::Forbidden(NO_ACCESS));
        }
        Ok(account)
    }

    /// Updates the caller's own profile; there is no target parameter.
    pub async fn patch_account(
        &self,
        caller: &Caller,
        input: PatchRequest,
    ) -> Result<ProfileUpdate, AccountError> {
        let input = validation::patch(input)?;
        let updated = self
            .store
            .update_profile(
                caller.id,
                ProfilePatch {
                    first_name: input.first_name,
                    last_name: input.last_name,
                    address: input.address,
                    modified_on: OffsetDateTime::now_utc(),
                },
            )
            .await?
            .ok_or_else(|| {
                warn!(caller = %caller.id, "patch for vanished account");
                AccountError::NotFound(NOT_FOUND)
            })?;
        info!(user_id = %caller.id, "account updated");
        Ok(updated)
    }

    pub async fn delete_account(&self, caller: &Caller, target: Uuid) -> Result<Account, AccountError> {
        if !can_delete(caller) {
            warn!(caller = %caller.id, %target, "non-admin tried to delete account");
            return Err(AccountError::Forbidden(ADMIN_ONLY));
        }
        let deleted = self
            .store
            .delete(target)
            .await?
            .ok_or(AccountError::NotFound(NOT_FOUND))?;
        info!(user_id = %deleted.id, caller = %caller.id, "account deleted");
        Ok(deleted)
    }
}
