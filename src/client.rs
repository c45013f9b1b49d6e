//! The submitting side of the contact form.
//!
//! [`ContactClient::submit`] posts the form to the relay once, and the form
//! is only reset when the relay confirms delivery. Every failure looks the
//! same to the caller, so the user can simply try again.

use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Sent,
    Failed,
}

impl SubmissionOutcome {
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionOutcome::Sent => "Message sent successfully!",
            SubmissionOutcome::Failed => "Failed to send message. Please try again.",
        }
    }
}

#[derive(Clone)]
pub struct ContactClient {
    http_client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ContactClient {
    /// `endpoint` is the full URL of the relay, e.g. `http://localhost:3001/api/contact`.
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    #[tracing::instrument(name = "Submitting contact form", skip(self, form))]
    pub async fn submit(&self, form: &mut ContactForm) -> SubmissionOutcome {
        match self.post(form).await {
            Ok(()) => {
                form.clear();
                SubmissionOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Contact form submission failed");
                SubmissionOutcome::Failed
            }
        }
    }

    async fn post(&self, form: &ContactForm) -> Result<(), reqwest::Error> {
        self.http_client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(form)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
