use anyhow::Result;
use traducteur::{config, logging, ui};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    config.apply_ui_overrides(std::env::var("PORT").ok(), std::env::var("API_URL").ok())?;

    let log_level = match logging::init(&config.ui.logs.level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    info!("Starting translator web UI with log level: {}", log_level);

    ui::run(config).await?;

    Ok(())
}
