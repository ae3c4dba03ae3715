use clap::Parser;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

mod settings;

#[derive(Debug, Parser)]
#[command(name = "thrifty", version)]
struct Args {
    /// Optional settings file path (TOML, extension may be omitted).
    #[arg(long, env = "THRIFTY_CONFIG")]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = settings::Settings::new(args.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "thrifty={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    log_sqlite_version(&db).await;

    let engine = engine::Engine::builder().database(db).build().await?;

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, listener).await?;

    Ok(())
}

async fn parse_database(
    config: &settings::Database,
) -> Result<DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(config.url()).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

async fn log_sqlite_version(db: &DatabaseConnection) {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        "SELECT sqlite_version() AS version",
    );
    match db.query_one(stmt).await {
        Ok(Some(row)) => match row.try_get::<String>("", "version") {
            Ok(version) => tracing::info!("SQLite version: {version}"),
            Err(err) => tracing::warn!("failed to read SQLite version: {err}"),
        },
        Ok(None) => tracing::warn!("SQLite version not available"),
        Err(err) => tracing::warn!("failed to query SQLite version: {err}"),
    }
}
