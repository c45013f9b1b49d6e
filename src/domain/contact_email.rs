#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        let is_empty = s.trim().is_empty();
        // Whatever passes here must also be usable as a Reply-To mailbox.
        let valid_email =
            validator::validate_email(&s) && s.parse::<lettre::Address>().is_ok();

        if is_empty || !valid_email {
            Err(format!("{s} is not a valid email"))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
