pub mod auth;
mod handlers;
mod routes;
pub mod views;

use anyhow::ensure;
use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sqlx::{Pool, Sqlite};
use tower_http::trace::TraceLayer;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    key: Key,
}

// Lets SignedCookieJar pull its signing key out of the app state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.key.clone()
    }
}

pub async fn run_server(pool: Pool<Sqlite>, config: Config) -> anyhow::Result<()> {
    ensure!(
        config.secret_key.len() >= 32,
        "SECRET_KEY must be at least 32 bytes"
    );

    let state = AppState {
        db: pool,
        key: Key::derive_from(config.secret_key.as_bytes()),
    };

    let app = routes::app_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("Server listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
