use bookstore::configuration::{get_configuration, Service};
use bookstore::startup::gateway::run;
use bookstore::telemetry::{get_subscriber, init_subscriber};
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let service = Service::Gateway;
    let subscriber = get_subscriber(service.name().into(), "info".into());
    init_subscriber(subscriber)?;

    let settings = get_configuration(service)?;

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener = TcpListener::bind(&address)?;

    run(listener, settings).await?.await?;
    Ok(())
}
