use crate::domain::{ContactEmail, ContactMessage, ContactName};

/// The JSON body posted to `/api/contact`.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct ContactFormBody {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessage,
}

impl TryFrom<ContactFormBody> for ContactSubmission {
    type Error = String;

    fn try_from(value: ContactFormBody) -> Result<Self, Self::Error> {
        let name = ContactName::parse(value.name)?;
        let email = ContactEmail::parse(value.email)?;
        let message = ContactMessage::parse(value.message)?;

        Ok(Self {
            name,
            email,
            message,
        })
    }
}
