use std::net::TcpListener;
use std::sync::Arc;

use anyhow::Context;

use portfolio_backend::app;
use portfolio_backend::client::EmailClient;
use portfolio_backend::intake::Intake;
use portfolio_backend::notify::Notifier;
use portfolio_backend::repo::JsonFileStore;
use portfolio_backend::settings::Settings;
use portfolio_backend::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::create_subscriber("info", std::io::stdout);
    telemetry::set_subscriber(subscriber)?;

    let settings = Settings::load().expect("Failed to load settings");

    let store = Arc::new(JsonFileStore::new(settings.storage.data_dir()));

    let email_client = EmailClient::new(
        settings.email.sender(),
        settings.email.api_timeout(),
        settings.email.api_base_url(),
        settings.email.api_auth_token(),
    )?;
    let notifier = Notifier::new(email_client, settings.email.owner());

    let intake = Intake::new(store, notifier);

    let listener = TcpListener::bind(settings.app.addr())?;

    app::run(listener, intake)?.await.context("Failed to run app")
}
