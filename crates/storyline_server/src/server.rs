//! Startup: load content, bind, serve until shutdown.

use crate::{AppState, StorylineConfig, create_router, with_cors};
use std::net::SocketAddr;
use storyline_core::{BookCatalog, ContentStore, Dictionary, NavigationEngine, PageResolver};
use storyline_error::{ServerError, ServerErrorKind, StorylineResult};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// Load books and dictionary described by `config` into an [`AppState`].
///
/// # Errors
///
/// Returns error if either content file is missing or invalid. Callers must
/// not serve traffic in that case.
#[instrument(skip_all, fields(books = %config.content.books_path.display()))]
pub fn load_state(config: &StorylineConfig) -> StorylineResult<AppState> {
    let mut store = ContentStore::load(&config.content.books_path)?;
    if let Some(introduction) = config.content.introduction_book {
        info!(introduction, "Overriding introduction book");
        store = store.with_introduction(introduction)?;
    }

    let dictionary = match &config.content.dictionary_path {
        Some(path) => Dictionary::load(path)?,
        None => {
            info!("No dictionary configured");
            Dictionary::empty()
        }
    };

    let catalog = BookCatalog::new(store.clone());
    let engine = NavigationEngine::new(PageResolver::new(store));
    Ok(AppState::new(engine, catalog, dictionary))
}

/// Bind `address` and serve `state` until Ctrl+C.
pub async fn serve_state(
    state: AppState,
    address: SocketAddr,
    cors_origins: &[String],
) -> StorylineResult<()> {
    let router = with_cors(create_router(state), cors_origins)?;

    let listener = TcpListener::bind(address).await.map_err(|e| {
        ServerError::new(ServerErrorKind::Bind {
            address: address.to_string(),
            message: e.to_string(),
        })
    })?;
    info!(%address, "Storyline server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Storyline server stopped");
    Ok(())
}

/// Load content and serve it as configured.
pub async fn serve(config: StorylineConfig) -> StorylineResult<()> {
    let address = config.socket_addr()?;
    let state = load_state(&config)?;
    serve_state(state, address, &config.server.cors_origins).await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, stopping gracefully..."),
        Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
    }
}
