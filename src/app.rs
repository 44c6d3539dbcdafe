use crate::{cli, context, rest, storage};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The main application state.
/// decoupled from CLI parsing to allow for easier testing.
pub struct App {
    config: context::Context,
    storage: storage::SqliteStorage,
    shutdown: CancellationToken,
}

impl App {
    /// Factory method to build the App from CLI arguments.
    /// Handles the side-effects: log file setup and store initialization.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = crate::cli::parse();

        crate::tracing::set_log_file(cli.log_file.as_deref().map(Path::new));

        let ctx = context::Context::from_cli(&cli);
        log_startup_info(&ctx);

        let storage = init_storage(&ctx)?;

        Ok((App::new(ctx, storage), cli))
    }

    fn new(config: context::Context, storage: storage::SqliteStorage) -> Self {
        Self {
            config,
            storage,
            shutdown: CancellationToken::new(),
        }
    }

    /// Main entry point for the Daemon.
    pub async fn run_daemon(&self) -> Result<()> {
        self.log_runtime_config();

        let mut rest_handle = self.spawn_rest_server();

        self.wait_for_shutdown(&mut rest_handle).await
    }

    fn spawn_rest_server(&self) -> JoinHandle<()> {
        let addr = self.config.api_listen;
        let store = self.storage.clone();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, store, token).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    async fn wait_for_shutdown(&self, rest_task: &mut JoinHandle<()>) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
        }

        self.shutdown.cancel();

        // Polling a completed JoinHandle again panics.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }

    fn log_runtime_config(&self) {
        log::info!("🌐 REST API: http://{}", self.config.api_listen);
        if let Some(path) = self.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }
    }
}

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting survey-store");
    log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
    log::info!("🗄️ Database: {}", ctx.database.to_string_lossy());
    log::info!("📦 Container: {}", ctx.container);
}

fn init_storage(ctx: &context::Context) -> Result<storage::SqliteStorage> {
    std::fs::create_dir_all(&ctx.data_dir).context("creating data dir")?;
    if let Some(parent) = ctx.database.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("creating database dir")?;
    }

    let sqlite = storage::SqliteStorage::new(&ctx.database, &ctx.container);
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;

    Ok(sqlite)
}

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    // Handle one-shot commands
    if let Some(cmd) = &cli.cmd {
        return cmd.run(&app.storage);
    }

    app.run_daemon().await
}
