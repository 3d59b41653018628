use todo_api::config::Config;
use todo_api::domain::repository::TodoListRepository;
use todo_api::http::routing;
use todo_api::infrastructure::sqlite_repo::SqliteRepository;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| config.default_log_filter().into()))
        .init();

    let repo = SqliteRepository::connect(&config.database_url).await?;
    repo.init().await?;
    let router = routing::build(repo, config.debug);

    tracing::info!(addr = %config.addr, debug = config.debug, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.addr).await?, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    use tokio::signal::ctrl_c;
    let _ = ctrl_c().await;
    tracing::info!("shutdown");
}
