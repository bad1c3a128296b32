mod common;

use actix_web::{test, web, App};
use base64::{engine::general_purpose::STANDARD, Engine};
use bookstore::helpers::{claims, InternalClaims, CLAIMS_HEADER, CLAIMS_SIGNATURE_HEADER};
use bookstore::routes;
use bookstore::services::identity::mock::MockIdentityResolver;
use bookstore::services::IdentityResolver;
use bookstore::startup::{json_config, path_config};
use serde_json::{json, Value};
use std::sync::Arc;

macro_rules! book_service {
    ($resolver:expr, $secret:expr) => {{
        let resolver: Arc<dyn IdentityResolver> = $resolver;
        test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(path_config())
                .app_data(web::Data::new(common::lazy_pool()))
                .app_data(web::Data::new(resolver))
                .configure(|cfg| routes::book::configure(cfg, $secret)),
        )
        .await
    }};
}

macro_rules! auth_service {
    ($resolver:expr) => {{
        let resolver: Arc<dyn IdentityResolver> = $resolver;
        test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(path_config())
                .app_data(web::Data::new(common::lazy_pool()))
                .app_data(web::Data::new(resolver))
                .configure(|cfg| routes::auth::configure(cfg, None)),
        )
        .await
    }};
}

fn member_claims() -> String {
    InternalClaims::new(7, "reader@mail.com").encode()
}

#[actix_web::test]
async fn info_route_needs_no_claims() {
    let app = book_service!(Arc::new(MockIdentityResolver::member()), None);

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!({"code": 200, "success": true, "data": "Hi, Welcome to Book Service Version 1", "message": ""})
    );
}

#[actix_web::test]
async fn request_without_claims_never_reaches_a_handler() {
    let resolver = Arc::new(MockIdentityResolver::admin());
    let app = book_service!(resolver.clone(), None);

    let req = test::TestRequest::get().uri("/book/1").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized: claims header is missing");
    assert_eq!(resolver.calls(), 0);
}

#[actix_web::test]
async fn claims_without_separator_are_rejected() {
    let resolver = Arc::new(MockIdentityResolver::admin());
    let app = book_service!(resolver.clone(), None);

    let req = test::TestRequest::get()
        .uri("/book")
        .insert_header((CLAIMS_HEADER, STANDARD.encode("1administrator@mail.com")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    assert_eq!(resolver.calls(), 0);
}

#[actix_web::test]
async fn claims_that_are_not_base64_are_rejected() {
    let app = book_service!(Arc::new(MockIdentityResolver::admin()), None);

    let req = test::TestRequest::get()
        .uri("/book")
        .insert_header((CLAIMS_HEADER, "%%%"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn member_cannot_create_books() {
    let resolver = Arc::new(MockIdentityResolver::member());
    let app = book_service!(resolver.clone(), None);

    let req = test::TestRequest::post()
        .uri("/book")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .set_json(json!({"title": "Refactoring", "publicationYear": 1999}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Unauthorized: role not authorized");
    assert_eq!(resolver.calls(), 1);
}

#[actix_web::test]
async fn failed_identity_lookup_is_internal_error() {
    let app = book_service!(Arc::new(MockIdentityResolver::unavailable()), None);

    let req = test::TestRequest::delete()
        .uri("/book/3")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 500);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        "Internal Server Error: failed to resolve user"
    );
}

#[actix_web::test]
async fn unsigned_claims_are_rejected_when_signing_is_on() {
    let resolver = Arc::new(MockIdentityResolver::unavailable());
    let app = book_service!(resolver.clone(), Some("internal-secret"));

    let req = test::TestRequest::get()
        .uri("/book")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/book")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .insert_header((CLAIMS_SIGNATURE_HEADER, claims::sign(&member_claims(), "wrong")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
    assert_eq!(resolver.calls(), 0);
}

#[actix_web::test]
async fn signed_claims_pass_the_identity_gate() {
    let resolver = Arc::new(MockIdentityResolver::unavailable());
    let app = book_service!(resolver.clone(), Some("internal-secret"));

    let req = test::TestRequest::get()
        .uri("/book")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .insert_header((
            CLAIMS_SIGNATURE_HEADER,
            claims::sign(&member_claims(), "internal-secret"),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    // reaches the role gate, where the lookup fails
    assert_eq!(resp.status(), 500);
    assert_eq!(resolver.calls(), 1);
}

#[actix_web::test]
async fn member_cannot_delete_users() {
    let app = auth_service!(Arc::new(MockIdentityResolver::member()));

    let req = test::TestRequest::delete()
        .uri("/user/1")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized: role not authorized");
}

#[actix_web::test]
async fn member_cannot_list_users() {
    let app = auth_service!(Arc::new(MockIdentityResolver::member()));

    let req = test::TestRequest::get()
        .uri("/user")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn credentials_are_only_served_for_login_claims() {
    let app = auth_service!(Arc::new(MockIdentityResolver::member()));

    let req = test::TestRequest::get()
        .uri("/user/credentials")
        .insert_header((CLAIMS_HEADER, member_claims()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized: credentials are internal");
}

#[actix_web::test]
async fn invalid_registration_payload_is_unprocessable() {
    let app = auth_service!(Arc::new(MockIdentityResolver::member()));

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({"email": "not-an-email", "password": "123"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 422);
}
