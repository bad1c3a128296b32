//! Auth service routes. `/register` is anonymous; everything under `/user`
//! passes the claims gate first.

mod me;
#[path = "register.rs"]
mod register_route;
mod user;

pub use me::{credentials, profile, update_profile};
pub use register_route::register;
pub use user::{add, delete, item, list, update};

use crate::middleware::ClaimsAuth;
use actix_web::{get, web, Responder};

#[get("/")]
pub async fn hi() -> impl Responder {
    super::welcome("Auth Service")
}

pub fn configure(cfg: &mut web::ServiceConfig, claims_secret: Option<&str>) {
    cfg.service(hi)
        .route("/ping", web::get().to(super::ping))
        .service(register)
        .service(
            web::scope("/user")
                .wrap(ClaimsAuth::new(claims_secret))
                // literal segments before `/{id}`
                .service(profile)
                .service(update_profile)
                .service(credentials)
                .service(list)
                .service(add)
                .service(item)
                .service(update)
                .service(delete),
        );
}
