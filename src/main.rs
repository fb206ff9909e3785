use anyhow::Result;

use suumo_scout::infrastructure::{ConfigManager, init_logging_with_config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigManager::new().load_config()?;
    init_logging_with_config(config.logging.clone())?;

    suumo_scout::run(config).await?;
    Ok(())
}
