//! Schema checks for signup, login and patch payloads.
//!
//! Each check returns the payload with surrounding whitespace trimmed from
//! every field except the password, or the first failure as
//! [`AccountError::Validation`].

use lazy_static::lazy_static;
use regex::Regex;

use super::dto::{LoginRequest, PatchRequest, SignupRequest};
use crate::error::AccountError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn required(field: &str, value: String) -> Result<String, AccountError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccountError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_owned())
}

fn email(value: String) -> Result<String, AccountError> {
    let value = required("email", value)?;
    if !is_valid_email(&value) {
        return Err(AccountError::Validation(
            "email must be a valid email".into(),
        ));
    }
    Ok(value)
}

pub fn signup(req: SignupRequest) -> Result<SignupRequest, AccountError> {
    let email = email(req.email)?;
    let chars = req.password.chars().count();
    if chars < MIN_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }
    if chars > MAX_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters long"
        )));
    }
    Ok(SignupRequest {
        email,
        password: req.password,
        first_name: required("firstName", req.first_name)?,
        last_name: required("lastName", req.last_name)?,
        address: required("address", req.address)?,
    })
}

pub fn login(req: LoginRequest) -> Result<LoginRequest, AccountError> {
    let email = email(req.email)?;
    if req.password.is_empty() {
        return Err(AccountError::Validation("password is required".into()));
    }
    Ok(LoginRequest {
        email,
        password: req.password,
    })
}

pub fn patch(req: PatchRequest) -> Result<PatchRequest, AccountError> {
    Ok(PatchRequest {
        first_name: required("firstName", req.first_name)?,
        last_name: required("lastName", req.last_name)?,
        address: required("address", req.address)?,
    })
}
