use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use lettre::{
    message::{Mailbox, MultiPart},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::{
    configuration::{SmtpSettings, TlsMode},
    domain::ContactEmail,
    utils::error_chain_fmt,
};

/// A composed notification, ready to be handed to a [`Mailer`].
///
/// Sender and recipient are fixed by the mailer's configuration, so only
/// the parts that vary per submission live here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub reply_to: ContactEmail,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStep {
    Verify,
    Send,
}

impl std::fmt::Display for DeliveryStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryStep::Verify => write!(f, "verify"),
            DeliveryStep::Send => write!(f, "send"),
        }
    }
}

#[derive(thiserror::Error)]
pub enum MailerError {
    #[error("SMTP session could not be verified")]
    Unreachable(#[source] anyhow::Error),
    #[error("Failed to compose the notification email")]
    Compose(#[source] anyhow::Error),
    #[error("SMTP server failed to accept the notification email")]
    Send(#[source] anyhow::Error),
    #[error("SMTP {step} step timed out after {after:?}")]
    Timeout { step: DeliveryStep, after: Duration },
}

impl std::fmt::Debug for MailerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Checks that the SMTP server is reachable and accepts our credentials.
    async fn verify(&self) -> Result<(), MailerError>;

    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> anyhow::Result<Self> {
        let sender = settings.sender().map_err(|e| anyhow!(e))?;
        let recipient = settings.recipient().map_err(|e| anyhow!(e))?;

        let builder = match settings.tls {
            TlsMode::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
            TlsMode::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host),
        };
        let mut builder = builder
            .port(settings.port)
            .timeout(Some(settings.timeout()));

        // Credentials never travel over an unencrypted session.
        match (settings.credentials(), settings.tls) {
            (Some(_), TlsMode::None) => {
                tracing::warn!("SMTP credentials are configured but TLS is off; ignoring them")
            }
            (Some(credentials), _) => builder = builder.credentials(credentials),
            (None, _) => {}
        }

        Ok(Self {
            transport: builder.build(),
            sender: Mailbox::new(
                Some(settings.sender_name.clone()),
                sender.as_ref().parse()?,
            ),
            recipient: Mailbox::new(None, recipient.as_ref().parse()?),
        })
    }

    fn message(&self, email: OutgoingEmail) -> Result<Message, MailerError> {
        let reply_to = email
            .reply_to
            .as_ref()
            .parse()
            .map_err(|e: lettre::address::AddressError| MailerError::Compose(e.into()))?;

        Message::builder()
            .from(self.sender.clone())
            .reply_to(Mailbox::new(None, reply_to))
            .to(self.recipient.clone())
            .subject(email.subject)
            .multipart(MultiPart::alternative_plain_html(
                email.text_body,
                email.html_body,
            ))
            .map_err(|e| MailerError::Compose(e.into()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[tracing::instrument(name = "Verifying SMTP session", skip(self))]
    async fn verify(&self) -> Result<(), MailerError> {
        match self.transport.test_connection().await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MailerError::Unreachable(anyhow!(
                "SMTP server did not answer NOOP"
            ))),
            Err(e) => Err(MailerError::Unreachable(e.into())),
        }
    }

    #[tracing::instrument(name = "Sending notification email", skip(self, email))]
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailerError> {
        let message = self.message(email)?;
        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| MailerError::Send(e.into()))?;

        tracing::info!(smtp.code = %response.code(), "Notification email accepted");
        Ok(())
    }
}
