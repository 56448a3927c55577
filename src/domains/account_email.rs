use validator::validate_email;

/// Login key of an account. Compared exactly as stored: no case folding.
#[derive(Debug, Clone)]
pub struct AccountEmail(String);

impl AccountEmail {
    pub fn parse(email: String) -> Result<AccountEmail, String> {
        if validate_email(&email) {
            Ok(Self(email))
        } else {
            Err("Email address is not valid".to_string())
        }
    }
}

impl AsRef<str> for AccountEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
