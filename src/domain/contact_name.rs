use unicode_segmentation::UnicodeSegmentation;

/// The sender's name. It ends up in the subject line, so it is kept short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

const MAX_NAME_GRAPHEMES: usize = 256;

impl ContactName {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.trim().is_empty() {
            return Err("name must not be empty".into());
        }

        if s.graphemes(true).count() > MAX_NAME_GRAPHEMES {
            return Err(format!(
                "name must be at most {MAX_NAME_GRAPHEMES} characters long"
            ));
        }

        Ok(Self(s))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
