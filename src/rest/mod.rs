use std::net::SocketAddr;

use axum::{routing::get, Router};

use crate::storage::Storage;

mod handlers;
mod models;
pub mod validation;

use handlers::{get_survey, health, list_surveys, method_not_allowed, not_found, put_survey};

pub const LIST_SURVEYS_PATH: &str = "/api/surveys";
pub const SURVEY_PATH: &str = "/api/survey";

#[derive(Clone)]
pub struct AppState<S: Storage> {
    pub storage: S,
    pub started_at: std::time::SystemTime,
}

pub fn router<S: Storage + Clone + Send + Sync + 'static>(storage: S) -> Router {
    let state = AppState {
        storage,
        started_at: std::time::SystemTime::now(),
    };

    Router::new()
        .route("/health", get(health::<S>))
        .route(
            LIST_SURVEYS_PATH,
            get(list_surveys::<S>).fallback(method_not_allowed),
        )
        .route(
            SURVEY_PATH,
            get(get_survey::<S>)
                .put(put_survey::<S>)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
}

pub async fn serve<S: Storage + Clone + Send + Sync + 'static>(
    addr: SocketAddr,
    storage: S,
    shutdown: tokio_util::sync::CancellationToken,
) -> anyhow::Result<()> {
    let app = router(storage);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 REST listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.cancelled().await;
            log::info!("🛑 REST shutdown requested");
        })
        .await?;
    log::info!("👋 REST server exited");
    Ok(())
}
