//! Book service routes. Every `/book` route requires an administrator caller.

mod crud;

pub use crud::*;

use crate::middleware::ClaimsAuth;
use actix_web::{get, web, Responder};

#[get("/")]
pub async fn hi() -> impl Responder {
    super::welcome("Book Service")
}

pub fn configure(cfg: &mut web::ServiceConfig, claims_secret: Option<&str>) {
    cfg.service(hi)
        .route("/ping", web::get().to(super::ping))
        .service(
            web::scope("/book")
                .wrap(ClaimsAuth::new(claims_secret))
                .service(list)
                .service(add)
                .service(item)
                .service(update)
                .service(delete),
        );
}
