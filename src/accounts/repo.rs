use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{
    Account, AccountRow, AccountSummary, NewAccount, ProfilePatch, ProfileUpdate,
};
use crate::error::StoreError;

/// Persistence of account rows. Every method is a single atomic statement.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a row; a taken email yields [`StoreError::UniqueViolation`].
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRow>, StoreError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccountSummary>, StoreError>;
    async fn list(&self) -> Result<Vec<AccountSummary>, StoreError>;
    /// `None` when no row has this id.
    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<Option<ProfileUpdate>, StoreError>;
    /// Returns the removed row, or `None` when nothing matched.
    async fn delete(&self, id: Uuid) -> Result<Option<Account>, StoreError>;
}

#[derive(Clone)]
pub struct PgAccountStore {
    db: PgPool,
}

impl PgAccountStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountStore for PgAccountStore {
    async fn insert(&self, new: NewAccount) -> Result<Account, StoreError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO users (email, first_name, last_name, address, password_hash,
                               status, is_admin, created_on, modified_on)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, email, first_name, last_name, address, status, is_admin,
                      created_on, modified_on
            "#,
        )
        .bind(&new.email)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.address)
        .bind(&new.password_hash)
        .bind(new.status)
        .bind(new.is_admin)
        .bind(new.created_on)
        .fetch_one(&self.db)
        .await?;
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRow>, StoreError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, first_name, last_name, address, password_hash, status,
                   is_admin, created_on, modified_on
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AccountSummary>, StoreError> {
        let row = sqlx::query_as::<_, AccountSummary>(
            r#"
            SELECT id, first_name, last_name, address, email, status, created_on, is_admin
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<AccountSummary>, StoreError> {
        let rows = sqlx::query_as::<_, AccountSummary>(
            r#"
            SELECT id, first_name, last_name, address, email, status, created_on, is_admin
            FROM users
            ORDER BY created_on ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        patch: ProfilePatch,
    ) -> Result<Option<ProfileUpdate>, StoreError> {
        let row = sqlx::query_as::<_, ProfileUpdate>(
            r#"
            UPDATE users
               SET first_name = $1, last_name = $2, address = $3, modified_on = $4
             WHERE id = $5
            RETURNING id, first_name, last_name, address, modified_on
            "#,
        )
        .bind(&patch.first_name)
        .bind(&patch.last_name)
        .bind(&patch.address)
        .bind(patch.modified_on)
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query_as::<_, Account>(
            r#"
            DELETE FROM users
             WHERE id = $1
            RETURNING id, email, first_name, last_name, address, status, is_admin,
                      created_on, modified_on
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }
}
