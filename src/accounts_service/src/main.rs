use accounts_adapters::config::Settings;
use accounts_service::{AccountsService, init_tracing};
use color_eyre::eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    let settings = Settings::load()?;
    let service = AccountsService::build(&settings).await?;
    tracing::info!(
        topic = %settings.notifications.topic,
        "Accounts service ready"
    );

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutdown signal received");
    service.shutdown().await?;

    Ok(())
}
