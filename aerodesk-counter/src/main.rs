use aerodesk_booking::Counter;
use aerodesk_catalog::StandardPricing;
use aerodesk_counter::{session_loop, ConsoleInput};
use aerodesk_store::{app_config::Config, load_catalog};
use anyhow::Context;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aerodesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Loading catalog from {}", config.catalog.path);

    let (flights, tickets) = load_catalog(&config.catalog.path)
        .with_context(|| format!("Failed to load catalog {}", config.catalog.path))?;
    let flights = flights.with_pair_match(config.routing.pair_match);

    let mut counter = Counter::new(flights, tickets, StandardPricing::new(config.pricing));
    let mut console = ConsoleInput::new(io::stdin().lock(), io::stdout());

    session_loop::run(&mut counter, &mut console)?;
    Ok(())
}
