use std::time::Duration;

use lettre::transport::smtp::authentication::Credentials;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::ContactEmail;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub smtp: SmtpSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Frontend origins allowed to post the contact form cross-origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub tls: TlsMode,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub sender_name: String,
    pub sender_email: String,
    pub recipient_email: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_milliseconds: u64,
}

#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TlsMode {
    /// Implicit TLS, usually port 465.
    Tls,
    /// Plaintext connection upgraded with STARTTLS, usually port 587.
    StartTls,
    /// No encryption. Local mail catchers only.
    None,
}

impl SmtpSettings {
    pub fn sender(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.sender_email.clone())
    }

    pub fn recipient(&self) -> Result<ContactEmail, String> {
        ContactEmail::parse(self.recipient_email.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }

    /// Both halves must be configured, otherwise the session is unauthenticated.
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(Credentials::new(
                username.clone(),
                password.expose_secret().clone(),
            )),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}

impl Settings {
    pub fn get() -> Result<Self, config::ConfigError> {
        let base_path = std::env::current_dir()
            .map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
        let configuration_directory = base_path.join("configuration");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .map_err(config::ConfigError::Message)?;
        let environment_filename = format!("{}.yaml", environment.as_str());

        let settings = config::Config::builder()
            .add_source(config::File::from(configuration_directory.join("base.yaml")))
            .add_source(config::File::from(
                configuration_directory.join(environment_filename),
            ))
            // e.g. `APP_SMTP__PASSWORD=...` sets `Settings.smtp.password`
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("application.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Self>()
    }
}
