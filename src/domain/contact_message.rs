#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage(String);

impl ContactMessage {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            Err("message must not be empty".into())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
