use contact_relay::configuration::Settings;
use contact_relay::startup::Application;
use contact_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("contact_relay".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get()?;
    let application = Application::build(config).await?;
    tracing::info!(port = application.port, "Contact relay is listening");

    application.run_until_stopped().await?;
    Ok(())
}
