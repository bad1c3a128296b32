use super::{json_config, path_config};
use crate::configuration::Settings;
use crate::connectors::{AuthServiceClient, ServiceClient};
use crate::routes;
use crate::services::IdentityResolver;
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

/// The book service has no user table: callers are resolved by the auth
/// service at `settings.services.auth_url`.
pub async fn run(
    listener: TcpListener,
    pg_pool: PgPool,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let claims_secret = settings.internal_claims.secret().map(str::to_string);
    let auth_client = AuthServiceClient::new(ServiceClient::new(
        settings.services.auth(),
        claims_secret.as_deref(),
    ));
    tracing::info!(auth = %auth_client.client().base_url(), "Resolving callers remotely");

    let resolver: Arc<dyn IdentityResolver> = Arc::new(auth_client);
    let resolver = web::Data::new(resolver);
    let pg_pool = web::Data::new(pg_pool);

    let server = HttpServer::new(move || {
        let claims_secret = claims_secret.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(pg_pool.clone())
            .app_data(resolver.clone())
            .configure(move |cfg| routes::book::configure(cfg, claims_secret.as_deref()))
            .default_service(web::route().to(routes::not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
