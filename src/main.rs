use clap::Parser;

use bookswap_mcp::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    bookswap_mcp::infra::telemetry::init_tracing(&config.log_level)?;

    bookswap_mcp::interface::mcp::run(config).await
}
