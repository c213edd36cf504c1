pub mod cookies;
pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use charsheet_core::context::BotContext;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(ctx: Arc<BotContext>) -> Router {
    let app_state = state::AppState::new(ctx);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::home::home))
        .route("/authorise", get(routes::auth::authorise))
        .route("/callback", get(routes::auth::callback))
        .route("/logout", get(routes::auth::logout))
        .route("/api/update", post(routes::updates::register))
        .route("/api/updates", get(routes::updates::list))
        .route("/api/updates/{id}/confirm", post(routes::updates::confirm))
        .route("/api/updates/{id}/dismiss", post(routes::updates::dismiss))
        .route("/api/events", get(routes::events::sse_events))
        .fallback(embed::static_handler)
        .layer(cors)
        .with_state(app_state)
}

/// Start the web companion on the given port.
pub async fn serve(ctx: Arc<BotContext>, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(ctx, listener, open_browser).await
}

/// Start the web companion on a pre-bound listener.
///
/// Accepting a `TcpListener` lets the caller read the actual port before
/// starting (useful when `port = 0` and the OS picks a free one).
pub async fn serve_on(
    ctx: Arc<BotContext>,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(ctx);

    tracing::info!("web companion listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
