use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use finance_tracker::{backend, config::Config, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("finance_tracker=debug,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = database::db::connection::get_db_pool(&config.database_url).await?;
    database::db::migrate::run_migrations(&pool).await?;

    backend::run_server(pool, config).await?;

    Ok(())
}
