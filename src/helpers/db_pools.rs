//! Connection pool construction for the services that own a database.
//!
//! The pool is built once at startup and handed to the HTTP server as
//! `web::Data<PgPool>`; sqlx pools are safe to share across workers.

use crate::configuration::DatabaseSettings;
use sqlx::migrate::Migrator;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;

pub static AUTH_MIGRATOR: Migrator = sqlx::migrate!("./migrations/auth");
pub static BOOK_MIGRATOR: Migrator = sqlx::migrate!("./migrations/book");

pub fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions, sqlx::Error> {
    let options = PgConnectOptions::from_str(&settings.connection_string)?;

    Ok(match settings.timezone.as_deref() {
        Some(timezone) if !timezone.trim().is_empty() => {
            options.options([("timezone", timezone.trim())])
        }
        _ => options,
    })
}

pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let connect_options = connect_options(settings)?;

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(Duration::from_secs(30))
        .connect_with(connect_options)
        .await
}
