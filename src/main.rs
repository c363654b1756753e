use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use quillpost_backend::{app, config::settings::Settings, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    info!("database connected");

    sqlx::migrate!().run(&pool).await?;

    let addr = settings.addr;
    let port = settings.port;
    let router = app(AppState::new(pool, settings));

    info!("Server running on http://localhost:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
