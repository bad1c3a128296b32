use anyhow::Context;
use bookstore::configuration::{get_configuration, Service};
use bookstore::helpers::db_pools;
use bookstore::services::ensure_admin;
use bookstore::startup::auth::run;
use bookstore::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let service = Service::Auth;
    let subscriber = get_subscriber(service.name().into(), "info".into());
    init_subscriber(subscriber)?;

    let settings = get_configuration(service)?;
    let database = settings.database().context("DB_CONN_STRING is required")?;

    let pg_pool = db_pools::connect(database)
        .await
        .context("Failed to connect to database")?;
    db_pools::AUTH_MIGRATOR
        .run(&pg_pool)
        .await
        .context("Failed to run migrations")?;
    ensure_admin(&pg_pool)
        .await
        .context("Failed to create the bootstrap administrator")?;

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address)?;

    run(listener, pg_pool, settings).await?.await?;
    Ok(())
}
