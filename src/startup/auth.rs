use super::{json_config, path_config};
use crate::configuration::Settings;
use crate::routes;
use crate::services::{IdentityResolver, LocalIdentityResolver};
use actix_web::{dev::Server, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub async fn run(
    listener: TcpListener,
    pg_pool: PgPool,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let resolver: Arc<dyn IdentityResolver> = Arc::new(LocalIdentityResolver::new(pg_pool.clone()));
    let resolver = web::Data::new(resolver);
    let pg_pool = web::Data::new(pg_pool);
    let claims_secret = settings.internal_claims.secret().map(str::to_string);

    let server = HttpServer::new(move || {
        let claims_secret = claims_secret.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(pg_pool.clone())
            .app_data(resolver.clone())
            .configure(move |cfg| routes::auth::configure(cfg, claims_secret.as_deref()))
            .default_service(web::route().to(routes::not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
