use consultant_marketplace_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
};
use sea_orm::SqlxPostgresConnector;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let pool = create_pool(&config.database_url).await?;
    let orm = SqlxPostgresConnector::from_sqlx_postgres_pool(pool);
    run_migrations(&orm).await?;
    println!("Migrations applied");
    Ok(())
}
