use std::{future::Future, sync::Arc, time::Duration};

use tera::{Context, Tera};

use crate::{
    domain::{ContactFormBody, ContactSubmission},
    mailer::{DeliveryStep, Mailer, MailerError, OutgoingEmail},
    utils::error_chain_fmt,
};

const HTML_TEMPLATE: &str = "contact.html";
const TEXT_TEMPLATE: &str = "contact.txt";

#[derive(thiserror::Error)]
pub enum ContactError {
    #[error("{0}")]
    Validation(String),
    #[error("Failed to deliver the contact email")]
    Delivery(#[from] MailerError),
}

impl std::fmt::Debug for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Turns a contact form submission into a notification email in the
/// owner's inbox. Holds no per-request state, so one instance serves every
/// request concurrently.
pub struct ContactRelay {
    mailer: Arc<dyn Mailer>,
    templates: Tera,
    timeout: Duration,
}

impl ContactRelay {
    pub fn new(mailer: Arc<dyn Mailer>, timeout: Duration) -> Result<Self, tera::Error> {
        let mut templates = Tera::default();
        // `.html` templates are autoescaped, `.txt` ones are not.
        templates.add_raw_templates(vec![
            (HTML_TEMPLATE, include_str!("../templates/contact.html")),
            (TEXT_TEMPLATE, include_str!("../templates/contact.txt")),
        ])?;

        Ok(Self {
            mailer,
            templates,
            timeout,
        })
    }

    #[tracing::instrument(
        name = "Relaying a contact submission",
        skip(self, body),
        fields(
            contact_email = %body.email,
            contact_name = %body.name,
        ),
    )]
    pub async fn relay(&self, body: ContactFormBody) -> Result<(), ContactError> {
        let submission = ContactSubmission::try_from(body).map_err(|e| {
            tracing::warn!(error.message = %e, "Rejected invalid contact submission");
            ContactError::Validation(e)
        })?;

        self.deliver(&submission).await.map_err(|e| {
            tracing::error!(error.cause_chain = ?e, "Failed to relay contact submission");
            ContactError::Delivery(e)
        })
    }

    async fn deliver(&self, submission: &ContactSubmission) -> Result<(), MailerError> {
        let email = self.compose(submission)?;

        self.bounded(DeliveryStep::Verify, self.mailer.verify())
            .await?;
        self.bounded(DeliveryStep::Send, self.mailer.send(email))
            .await
    }

    async fn bounded<F>(&self, step: DeliveryStep, future: F) -> Result<(), MailerError>
    where
        F: Future<Output = Result<(), MailerError>>,
    {
        tokio::time::timeout(self.timeout, future)
            .await
            .map_err(|_| MailerError::Timeout {
                step,
                after: self.timeout,
            })?
    }

    pub fn compose(&self, submission: &ContactSubmission) -> Result<OutgoingEmail, MailerError> {
        let mut context = Context::new();
        context.insert("name", submission.name.as_ref());
        context.insert("email", submission.email.as_ref());
        context.insert("message", submission.message.as_ref());

        let render = |template: &str| {
            self.templates
                .render(template, &context)
                .map_err(|e| MailerError::Compose(e.into()))
        };

        Ok(OutgoingEmail {
            reply_to: submission.email.clone(),
            subject: format!("New Contact from {}", submission.name.as_ref()),
            text_body: render(TEXT_TEMPLATE)?,
            html_body: render(HTML_TEMPLATE)?,
        })
    }
}
