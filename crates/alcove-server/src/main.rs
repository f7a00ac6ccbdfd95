use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use alcove_api::{AppState, AppStateInner, comments, health};
use alcove_core::{Classifier, Comments, ModerationConfig};
use alcove_store::RedisStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alcove=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let redis_url =
        std::env::var("ALCOVE_REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".into());
    let namespace = std::env::var("ALCOVE_NAMESPACE").unwrap_or_else(|_| "alcove".into());
    let host = std::env::var("ALCOVE_HOST").unwrap_or_else(|_| "127.0.0.1".into());
    let port: u16 = std::env::var("ALCOVE_PORT")
        .unwrap_or_else(|_| "2668".into())
        .parse()?;
    let akismet_key = std::env::var("ALCOVE_AKISMET_KEY")
        .ok()
        .filter(|key| !key.is_empty());
    let site_url =
        std::env::var("ALCOVE_SITE_URL").unwrap_or_else(|_| "http://localhost/".into());

    if akismet_key.is_none() {
        info!("no ALCOVE_AKISMET_KEY set; new comments stay pending");
    }

    // Init store
    let store = Arc::new(RedisStore::connect(&redis_url, namespace)?);

    // Shared state
    let comments_service = Comments::new(
        store.clone(),
        Classifier::new(ModerationConfig {
            akismet_key,
            site_url,
        }),
    );
    let state: AppState = Arc::new(AppStateInner {
        comments: comments_service,
        store,
    });

    // Routes
    let app = Router::new()
        .route(
            "/comments",
            get(comments::list_comments).post(comments::submit_comment),
        )
        .route("/healthz", get(health::healthz))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("alcove listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
