use community_portal::{
    AppConfig, PostgresRepository,
    repository::Repository,
    seeders::{AdminSeeder, DatabaseSeeder, Seeder},
};
use sqlx::postgres::PgPoolOptions;
use std::process::ExitCode;

/// Runs the database seeders against `DATABASE_URL`.
#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let config = AppConfig::load();
    community_portal::init_tracing(&config);

    match seed(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("seeding aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn seed(config: &AppConfig) -> community_portal::error::Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.db_url)
        .await?;

    let repo = PostgresRepository::new(pool);
    repo.migrate().await?;

    let report = DatabaseSeeder::new(AdminSeeder::from_config(config))
        .run(&repo)
        .await?;

    tracing::info!(
        admin_created = report.admin_created,
        users_created = report.users_created,
        total_users = repo.count_users().await?,
        "seeding finished"
    );
    Ok(())
}
