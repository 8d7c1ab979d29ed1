use tracing::info;

use switchboard::server::{AppState, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (development); in production the process
    // manager provides environment variables.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .without_time()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "switchboard=info,tower_http=info".into()),
        )
        .init();

    let addr =
        std::env::var("SWITCHBOARD_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let server = Server::bind(&addr, AppState::new()).await?;
    info!("switchboard listening on {}", server.local_addr()?);
    server.run_until(shutdown_signal()).await
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutting down");
}
