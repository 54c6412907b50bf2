use std::net::SocketAddr;
use std::path::PathBuf;

use activity_server::{resolve_addr, router, AppState, ServerConfig};
use anyhow::Context;
use clap::Parser;

/// Local save/upload server for the stage authoring tools
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// listen address (falls back to ACTIVITY_SERVER_ADDR / ACTIVITY_SERVER_PORT)
    #[arg(long)]
    addr: Option<SocketAddr>,

    /// stage catalog script rewritten by /save
    #[arg(long, default_value = "js/stages.js")]
    stages: PathBuf,

    /// directory /upload stores images in
    #[arg(long, default_value = "images/교재png")]
    images: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let addr = resolve_addr(cli.addr, |k| std::env::var(k).ok());
    let app = router(AppState::new(ServerConfig {
        stages_path: cli.stages.clone(),
        images_dir: cli.images.clone(),
    }));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind {addr}"))?;
    log::info!("save server running at http://{addr}");
    log::info!("monitoring {}", cli.stages.display());

    axum::serve(listener, app).await.context("server stopped")?;
    Ok(())
}
