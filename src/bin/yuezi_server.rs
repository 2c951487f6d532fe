use std::path::PathBuf;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use yuezi::ParserConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("yuezi=info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // optional first argument: path to a TOML/JSON/YAML config file
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = ParserConfig::load(config_path.as_deref())?;

    yuezi::api::run_server(config).await
}
