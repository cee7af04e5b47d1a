use std::sync::Arc;

use compost::server::{
    config::Config, mail::ConsoleMailer, model::app::AppState, router, startup,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let session = startup::connect_to_session(&config).await.unwrap();
    let db = startup::connect_to_database(&config).await.unwrap();
    let media = startup::prepare_media(&config).await.unwrap();

    let state = AppState::new(db, media, Arc::new(ConsoleMailer), config.site.clone());
    let app = router::routes().with_state(state).layer(session);

    let listener = match tokio::net::TcpListener::bind(&config.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("Failed to bind {}: {}", config.bind_address, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting server on {}", config.bind_address);

    axum::serve(listener, app).await.unwrap();
}
