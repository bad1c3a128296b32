use super::{json_config, path_config};
use crate::configuration::Settings;
use crate::connectors::{AuthServiceClient, ServiceClient, Upstreams};
use crate::helpers::TokenCodec;
use crate::routes;
use actix_cors::Cors;
use actix_web::{dev::Server, web, App, HttpServer};
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub async fn run(listener: TcpListener, settings: Settings) -> Result<Server, std::io::Error> {
    let claims_secret = settings.internal_claims.secret();
    let upstreams = web::Data::new(Upstreams {
        auth: AuthServiceClient::new(ServiceClient::new(settings.services.auth(), claims_secret)),
        book: ServiceClient::new(settings.services.book(), claims_secret),
    });

    let codec = TokenCodec::from_settings(&settings.jwt);
    let codec_data = web::Data::new(codec.clone());

    tracing::info!(
        auth = %upstreams.auth.client().base_url(),
        book = %upstreams.book.base_url(),
        "Forwarding to internal services"
    );

    let server = HttpServer::new(move || {
        let codec = codec.clone();
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(json_config())
            .app_data(path_config())
            .app_data(upstreams.clone())
            .app_data(codec_data.clone())
            .configure(move |cfg| routes::gateway::configure(cfg, codec))
            .default_service(web::route().to(routes::not_found))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
