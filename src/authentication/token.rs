use crate::domains::AccountId;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};

/// Validity window of a session, shared by the token `exp` claim and the
/// cookie `Max-Age`.
pub const SESSION_TTL_SECONDS: i64 = 3600;

/// What a valid session token proves about its holder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionClaims {
    #[serde(rename = "sub")]
    pub account_id: AccountId,
    pub email: String,
    pub name: String,
    #[serde(rename = "iat")]
    pub issued_at: i64,
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

pub struct IssuedToken {
    pub token: Secret<String>,
    pub expires_at: i64,
}

#[derive(thiserror::Error, Debug)]
pub enum SessionTokenError {
    #[error("Session token has expired")]
    Expired,
    #[error("Session token is invalid")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Signs and verifies stateless HS256 session tokens.
///
/// There is no revocation list: a token stays valid until `exp` even after
/// the holder logs out or changes their password. Changing the signing
/// secret invalidates every outstanding token.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl SessionIssuer {
    pub fn new(signing_secret: &Secret<String>) -> Result<Self, anyhow::Error> {
        let secret = signing_secret.expose_secret();
        if secret.trim().is_empty() {
            anyhow::bail!("The session signing secret is blank");
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(
        &self,
        account_id: AccountId,
        email: &str,
        name: &str,
    ) -> Result<IssuedToken, anyhow::Error> {
        self.issue_at(account_id, email, name, Utc::now())
    }

    pub fn issue_at(
        &self,
        account_id: AccountId,
        email: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, anyhow::Error> {
        let issued_at = now.timestamp();
        let claims = SessionClaims {
            account_id,
            email: email.to_owned(),
            name: name.to_owned(),
            issued_at,
            expires_at: issued_at + SESSION_TTL_SECONDS,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign session token: {}", e))?;
        Ok(IssuedToken {
            token: Secret::new(token),
            expires_at: claims.expires_at,
        })
    }

    pub fn verify(&self, token: &Secret<String>) -> Result<SessionClaims, SessionTokenError> {
        self.verify_at(token, Utc::now())
    }

    /// A token is rejected from the second its `exp` claim names onwards.
    pub fn verify_at(
        &self,
        token: &Secret<String>,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, SessionTokenError> {
        let claims = decode::<SessionClaims>(
            token.expose_secret(),
            &self.decoding_key,
            &self.validation,
        )
        .map_err(SessionTokenError::Invalid)?
        .claims;

        if now.timestamp() >= claims.expires_at {
            return Err(SessionTokenError::Expired);
        }
        Ok(claims)
    }
}
