mod claims;
pub mod credentials;
pub mod extractors;
pub mod jwt;
mod password;
