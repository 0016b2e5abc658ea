use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{
        DataEnvelope, ListData, LoginData, LoginRequest, PatchRequest, RowsData, SignupRequest,
        SignupResponse,
    },
    repo_types::{Account, AccountSummary, ProfileUpdate},
};
use crate::{auth::extractors::AuthUser, error::AccountError, state::AppState};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).patch(patch_user))
        .route("/users/:id", get(get_user).delete(delete_user))
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AccountError> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| AccountError::Validation(e.body_text()))
}

fn path_id(id: Result<Path<Uuid>, PathRejection>) -> Result<Uuid, AccountError> {
    id.map(|Path(id)| id)
        .map_err(|e| AccountError::Validation(e.body_text()))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SignupResponse>), AccountError> {
    let created = state.accounts.create_account(body(payload)?).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            token: created.token,
            data: created.account,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<DataEnvelope<LoginData>>, AccountError> {
    let token = state.accounts.authenticate(body(payload)?).await?;
    Ok(Json(DataEnvelope::single(LoginData {
        message: "Logged in successfully",
        token,
    })))
}

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<DataEnvelope<ListData>>, AccountError> {
    let rows = state.accounts.list_accounts(&caller).await?;
    Ok(Json(DataEnvelope::single(ListData {
        message: "users retrieve successfully",
        row_count: rows.len(),
        rows,
    })))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DataEnvelope<RowsData<AccountSummary>>>, AccountError> {
    let account = state.accounts.get_account(&caller, path_id(id)?).await?;
    Ok(Json(DataEnvelope::single(RowsData {
        message: format!("users with id:{} retrieve successfully", account.id),
        rows: vec![account],
    })))
}

#[instrument(skip(state, payload))]
pub async fn patch_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    payload: Result<Json<PatchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DataEnvelope<RowsData<ProfileUpdate>>>), AccountError> {
    let updated = state.accounts.patch_account(&caller, body(payload)?).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(DataEnvelope::single(RowsData {
            message: format!("user with id:{} has been updated", updated.id),
            rows: vec![updated],
        })),
    ))
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<DataEnvelope<RowsData<Account>>>, AccountError> {
    let deleted = state.accounts.delete_account(&caller, path_id(id)?).await?;
    Ok(Json(DataEnvelope::single(RowsData {
        message: format!("users with id:{} has been deleted", deleted.id),
        rows: vec![deleted],
    })))
}
