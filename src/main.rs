use anyhow::Context;
use attio_chain_sync::utils::{logger, validation::Validate};
use attio_chain_sync::{SyncConfig, SyncEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    tracing::info!("Starting attio-chain-sync");

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration error: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let engine = SyncEngine::new(config);
    engine.run().await.context("chain sync failed")?;

    println!("✅ Sync run complete");
    Ok(())
}
