use std::time::Duration;

use contact_relay::client::{ContactClient, ContactForm, SubmissionOutcome};

use crate::helpers::{spawn_app, spawn_app_with, StubBehaviour, TestApp};

fn contact_client(app: &TestApp) -> ContactClient {
    ContactClient::new(
        format!("{}/api/contact", app.address),
        Duration::from_secs(5),
    )
}

fn ada() -> ContactForm {
    ContactForm {
        name: "Ada".into(),
        email: "ada@example.com".into(),
        message: "Hello".into(),
    }
}

#[tokio::test]
async fn client_submission_reaches_the_inbox_and_clears_the_form() {
    // GIVEN
    let app = spawn_app().await;
    let client = contact_client(&app);
    let mut form = ada();

    // WHEN
    let outcome = client.submit(&mut form).await;

    // THEN
    assert_eq!(outcome, SubmissionOutcome::Sent);
    assert_eq!(form, ContactForm::default());
    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "New Contact from Ada");
}

#[tokio::test]
async fn client_keeps_the_form_when_delivery_fails() {
    // GIVEN
    let app = spawn_app_with(StubBehaviour::FailSend).await;
    let client = contact_client(&app);
    let mut form = ada();

    // WHEN
    let outcome = client.submit(&mut form).await;

    // THEN
    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(form, ada());
}

#[tokio::test]
async fn client_keeps_the_form_when_the_relay_rejects_it() {
    // GIVEN
    let app = spawn_app().await;
    let client = contact_client(&app);
    let mut form = ContactForm {
        email: "not an address".into(),
        ..ada()
    };
    let before = form.clone();

    // WHEN
    let outcome = client.submit(&mut form).await;

    // THEN
    assert_eq!(outcome, SubmissionOutcome::Failed);
    assert_eq!(form, before);
    assert!(app.mailer.sent().is_empty());
}
