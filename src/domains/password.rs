use secrecy::{ExposeSecret, Secret};
use unicode_segmentation::UnicodeSegmentation;

/// A plaintext password about to be hashed and stored.
#[derive(Debug)]
pub struct Password(Secret<String>);

impl Password {
    pub fn parse(password: Secret<String>) -> Result<Password, String> {
        let candidate = password.expose_secret();
        if candidate.trim().is_empty() {
            return Err("Password must not be blank".to_string());
        }
        if candidate.graphemes(true).count() > 128 {
            return Err("Password must be at most 128 characters long".to_string());
        }
        Ok(Self(password))
    }

    pub fn into_secret(self) -> Secret<String> {
        self.0
    }
}
