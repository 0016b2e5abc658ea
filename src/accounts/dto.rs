use serde::{Deserialize, Serialize};

use super::repo_types::{Account, AccountSummary};

/// Request body for signup. Missing fields deserialize empty and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

/// Request body for login.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for a self-service profile patch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatchRequest {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

/// Response returned after signup.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub token: String,
    pub data: Account,
}

/// `{ "data": [ .. ] }` wrapper shared by the other success responses.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: Vec<T>,
}

impl<T> DataEnvelope<T> {
    pub fn single(item: T) -> Self {
        Self { data: vec![item] }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub message: &'static str,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    pub message: &'static str,
    pub rows: Vec<AccountSummary>,
    pub row_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RowsData<T> {
    pub message: String,
    pub rows: Vec<T>,
}
