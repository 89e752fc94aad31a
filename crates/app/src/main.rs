use migration::{Migrator, MigratorTrait};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // A missing .env is fine, the variables may come from the environment.
    let _ = dotenvy::dotenv();
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&settings.app.level))
        .init();

    let db = connect(&settings.database_uri).await?;
    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

/// Directives for our crates and the HTTP request trace.
fn log_filter(level: &str) -> String {
    format!("finorg={level},server={level},engine={level},tower_http={level}")
}

async fn connect(
    uri: &str,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!("Connecting to database...");
    let database = sea_orm::Database::connect(uri).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
