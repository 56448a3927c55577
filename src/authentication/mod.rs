//! src/authentication/mod.rs
mod middleware;
mod password;
mod token;

pub use middleware::{
    forbidden, reject_anonymous_users, GuardMode, SessionGrant, ACCOUNT_ID_COOKIE, TOKEN_COOKIE,
};
pub use password::PasswordHasher;
pub use token::{IssuedToken, SessionClaims, SessionIssuer, SessionTokenError, SESSION_TTL_SECONDS};
