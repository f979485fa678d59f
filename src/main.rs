use sessiongate::config::{ServerConfig, SessionConfig};
use sessiongate::{routes, state};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // A missing .env is fine; the environment may be set directly.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let session = SessionConfig::from_env().expect("session configuration invalid");
    let server = ServerConfig::from_env().expect("server configuration invalid");
    let port = server.port;

    tracing::info!(api = %session.api_base_url, cookie = %session.cookie_name, "session config loaded");

    let app = routes::app(state::AppState::new(session));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "sessiongate listening");
    axum::serve(listener, app).await.expect("server failed");
}
