use crate::configuration::HashingSettings;
use argon2::password_hash::SaltString;
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher as _, PasswordVerifier as _, Version,
};
use secrecy::{ExposeSecret, Secret};

/// Salted Argon2id hashing with a configurable work factor.
///
/// Digests are PHC strings, so the salt and parameters used at hash time
/// travel with the digest and verification does not depend on the
/// hasher's current configuration.
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    // Verified against when there is no stored digest to compare with.
    dummy_digest: Secret<String>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl PasswordHasher {
    pub fn new(settings: &HashingSettings) -> Result<Self, anyhow::Error> {
        let params = Params::new(
            settings.memory_cost_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|e| anyhow::anyhow!("Invalid argon2 parameters: {}", e))?;
        let dummy_digest = compute_password_hash(
            params.clone(),
            &Secret::new("dummy password for timing equalisation".to_string()),
        )?;
        Ok(Self {
            params,
            dummy_digest,
        })
    }

    pub fn hash(&self, password: &Secret<String>) -> Result<Secret<String>, anyhow::Error> {
        compute_password_hash(self.params.clone(), password)
    }

    /// Check `candidate` against `digest`. Malformed digests verify as false.
    pub fn verify(&self, candidate: &Secret<String>, digest: &Secret<String>) -> bool {
        let digest = match PasswordHash::new(digest.expose_secret()) {
            Ok(digest) => digest,
            Err(e) => {
                tracing::warn!(error = %e, "Stored password digest could not be parsed");
                return false;
            }
        };

        tracing::info_span!("Verify password hash").in_scope(|| {
            Argon2::default()
                .verify_password(candidate.expose_secret().as_bytes(), &digest)
                .is_ok()
        })
    }

    /// Spend the same effort as a real verification, then report failure.
    pub fn verify_against_dummy(&self, candidate: &Secret<String>) -> bool {
        let _ = self.verify(candidate, &self.dummy_digest);
        false
    }
}

fn compute_password_hash(
    params: Params,
    password: &Secret<String>,
) -> Result<Secret<String>, anyhow::Error> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();
    Ok(Secret::new(password_hash))
}
