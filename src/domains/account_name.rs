use unicode_segmentation::UnicodeSegmentation;

/// Display name of an account.
#[derive(Debug, Clone)]
pub struct AccountName(String);

impl AccountName {
    pub fn parse(name: String) -> Result<AccountName, String> {
        let is_empty_string = name.trim().is_empty();
        let is_too_long = name.graphemes(true).count() > 256;
        let forbidden_chars = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let forbidden_char_present = name.chars().any(|char| forbidden_chars.contains(&char));

        if is_empty_string || is_too_long || forbidden_char_present {
            Err("Account name is not valid".to_string())
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
