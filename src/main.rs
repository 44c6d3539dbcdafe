mod app;
mod cli;
mod commands;
mod context;
mod rest;
mod storage;
mod tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    crate::tracing::init();
    app::run().await
}
