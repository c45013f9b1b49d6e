use std::{net::TcpListener, sync::Arc};

use actix_web::dev::Server;

use crate::{
    configuration::Settings,
    mailer::{Mailer, SmtpMailer},
    relay::ContactRelay,
    run,
};

pub struct Application {
    pub port: u16,
    pub server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> anyhow::Result<Self> {
        let mailer = SmtpMailer::new(&config.smtp)?;

        Self::build_with_mailer(config, Arc::new(mailer))
    }

    /// Same as [`Application::build`], but delivers through `mailer` instead of SMTP.
    pub fn build_with_mailer(config: Settings, mailer: Arc<dyn Mailer>) -> anyhow::Result<Self> {
        let relay = ContactRelay::new(mailer, config.smtp.timeout())?;

        let address = (config.application.host.as_str(), config.application.port);
        let listener = TcpListener::bind(address)?;
        let port = listener.local_addr()?.port();

        let server = run(listener, relay, config.application.allowed_origins)?;

        Ok(Self { port, server })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
