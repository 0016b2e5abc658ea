use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Lifecycle status of an account; maps to the `account_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Pending,
    Active,
    Suspended,
}

/// Full `users` row, password hash included. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub password_hash: String,
    pub status: AccountStatus,
    pub is_admin: bool,
    pub created_on: OffsetDateTime,
    pub modified_on: OffsetDateTime,
}

/// Account as returned by signup and delete.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub status: AccountStatus,
    pub is_admin: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_on: OffsetDateTime,
}

/// Non-sensitive projection used by list and fetch-one.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccountSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub email: String,
    pub status: AccountStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_on: OffsetDateTime,
    pub is_admin: bool,
}

/// Fields touched by a self-service patch.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    #[serde(with = "time::serde::rfc3339")]
    pub modified_on: OffsetDateTime,
}

/// Values for a new `users` row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub password_hash: String,
    pub status: AccountStatus,
    pub is_admin: bool,
    pub created_on: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct ProfilePatch {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub modified_on: OffsetDateTime,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            status: row.status,
            is_admin: row.is_admin,
            created_on: row.created_on,
            modified_on: row.modified_on,
        }
    }
}

impl From<AccountRow> for AccountSummary {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            address: row.address,
            email: row.email,
            status: row.status,
            created_on: row.created_on,
            is_admin: row.is_admin,
        }
    }
}
