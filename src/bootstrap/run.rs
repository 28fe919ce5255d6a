use anyhow::Context;
use cp_app::AppPaths;
use tracing::info;

use super::cli::Cli;
use super::config::resolve_config;
use super::tracing::init_tracing_subscriber;
use super::wiring::{resolve_app_dirs, wire_engine};

/// Loads config, installs tracing, wires the engine and runs it until Ctrl-C.
pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let initial_dirs = resolve_app_dirs(cli.data_dir.as_deref(), None)?;
    let default_config_path = AppPaths::from_app_dirs(&initial_dirs).config_path;
    let config = resolve_config(cli.config.as_deref(), &default_config_path)?;

    let app_dirs = resolve_app_dirs(cli.data_dir.as_deref(), Some(&config))?;
    let paths = AppPaths::from_app_dirs(&app_dirs);

    init_tracing_subscriber(&paths.logs_dir).context("Failed to initialize tracing")?;
    info!(data_dir = %app_dirs.app_data_root.display(), "starting clippin");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;

    runtime.block_on(async {
        let (engine, handle) = wire_engine(&config, &paths)?;
        let engine_task = tokio::spawn(engine.run());

        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;
        info!("Ctrl-C received, shutting down");

        handle.shutdown().await?;
        engine_task.await.context("engine task panicked")?;
        info!("clippin stopped");
        Ok(())
    })
}
