use anyhow::Context;
use clap::Parser;
use moar_horse_5::{payload, Config, Session};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();

    if !config.skip_build {
        payload::build(&config.solve_dir).await?;
    }
    let solve = payload::load(&config.payload_path()).await?;

    let session = Session::connect(&config)
        .await
        .with_context(|| format!("connecting to {}", config.addr()))?;

    let mut stdout = tokio::io::stdout();
    let summary = session.run(&solve, &mut stdout).await?;
    tracing::debug!(?summary, "done");

    Ok(())
}
