use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use course_sniper::adapters::{ConsoleReporter, HttpRegistrationGateway, WsEventFeed};
use course_sniper::application::Coordinator;
use course_sniper::config::{AppConfig, CliArgs};
use course_sniper::domain::SessionState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = CliArgs::parse();
    let config = AppConfig::load(&args.config_path)
        .context("reading auth token and favorites from file")?;

    let gateway = HttpRegistrationGateway::new(
        config.endpoints.registration_url.clone(),
        &config.endpoints.referer,
        config.token(),
        config.endpoints.timeout(),
    )
    .context("building registration gateway")?;

    let feed = WsEventFeed::connect(&config.feed_url_with_token())
        .await
        .context("establishing feed connection")?;

    let coordinator = Coordinator::new(
        SessionState::new(config.favorites.clone(), config.action),
        Arc::new(gateway),
        Arc::new(ConsoleReporter::new()),
        args.retry_policy(),
        args.offset(),
        args.on_time,
    );

    let outcomes = coordinator.run(feed).await.context("running registration session")?;

    let registered = outcomes.iter().filter(|o| o.status.is_success()).count();
    info!(
        registered,
        failed = outcomes.len() - registered,
        "registration batch complete"
    );

    Ok(())
}
