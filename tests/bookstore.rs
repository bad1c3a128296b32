mod common;

use bookstore::models::{ADMIN_EMAIL, ADMIN_PASSWORD};
use serde_json::{json, Value};

struct Stack {
    gateway: common::TestApp,
    auth: common::TestApp,
    client: reqwest::Client,
}

/// Auth, book and gateway wired together. `None` without PostgreSQL.
async fn spawn_stack() -> Option<Stack> {
    let unused = common::closed_address();
    let auth = common::spawn_auth_service(common::settings(&unused, &unused)).await?;
    let book = common::spawn_book_service(common::settings(&auth.address, &unused)).await?;
    let gateway = common::spawn_gateway(common::settings(&auth.address, &book.address)).await;

    Some(Stack {
        gateway,
        auth,
        client: reqwest::Client::new(),
    })
}

impl Stack {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.gateway.address, path)
    }

    async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/auth/token"))
            .json(&json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    async fn token(&self, email: &str, password: &str) -> String {
        let body: Value = self.login(email, password).await.json().await.unwrap();
        body["data"].as_str().expect("token").to_string()
    }

    async fn register(&self, email: &str) -> reqwest::Response {
        self.client
            .post(self.url("/auth/register"))
            .json(&json!({
                "email": email,
                "password": "reader-pass",
                "firstName": "Book",
                "lastName": "Reader",
            }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    async fn user_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.auth.db_pool.as_ref().unwrap())
            .await
            .unwrap()
    }
}

#[tokio::test]
async fn administrator_lists_users_and_creates_books() {
    let Some(stack) = spawn_stack().await else {
        return;
    };
    let token = stack.token(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let resp = stack
        .client
        .get(stack.url("/auth/user"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let users = body["data"].as_array().expect("user list");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], ADMIN_EMAIL);
    assert_eq!(users[0]["isAdmin"], true);
    assert!(users[0].get("password").is_none());

    let resp = stack
        .client
        .post(stack.url("/book"))
        .bearer_auth(&token)
        .json(&json!({
            "title": "Domain-Driven Design",
            "author": "Eric Evans",
            "publisher": "Addison-Wesley",
            "publicationYear": 2003,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    let book_id = body["data"].as_i64().expect("book id");

    let resp = stack
        .client
        .put(stack.url(&format!("/book/{}", book_id)))
        .bearer_auth(&token)
        .json(&json!({"publicationYear": 2004}))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["title"], "Domain-Driven Design");
    assert_eq!(body["data"]["publicationYear"], 2004);

    let resp = stack
        .client
        .delete(stack.url(&format!("/book/{}", book_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], 1);

    let resp = stack
        .client
        .get(stack.url(&format!("/book/{}", book_id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let Some(stack) = spawn_stack().await else {
        return;
    };

    let resp = stack.register("reader@mail.com").await;
    assert_eq!(resp.status(), 200);
    assert_eq!(stack.user_count().await, 2);

    let resp = stack.register("reader@mail.com").await;
    assert_eq!(resp.status(), 409);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Conflict: email registered");
    assert_eq!(stack.user_count().await, 2);
}

#[tokio::test]
async fn member_is_limited_to_self_service() {
    let Some(stack) = spawn_stack().await else {
        return;
    };
    stack.register("reader@mail.com").await;
    let token = stack.token("reader@mail.com", "reader-pass").await;

    let resp = stack
        .client
        .post(stack.url("/book"))
        .bearer_auth(&token)
        .json(&json!({"title": "Refactoring", "publicationYear": 1999}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized: role not authorized");

    let resp = stack
        .client
        .put(stack.url("/auth/me"))
        .bearer_auth(&token)
        .json(&json!({"address": "Jakarta", "isAdmin": true}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["address"], "Jakarta");
    assert_eq!(body["data"]["isAdmin"], false);

    let resp = stack
        .client
        .get(stack.url("/auth/me"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["email"], "reader@mail.com");
    assert_eq!(body["data"]["firstName"], "Book");
    assert_eq!(body["data"]["isAdmin"], false);

    let resp = stack
        .client
        .delete(stack.url("/auth/user/1"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn wrong_password_does_not_issue_a_token() {
    let Some(stack) = spawn_stack().await else {
        return;
    };

    let resp = stack.login(ADMIN_EMAIL, "Password.124").await;
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Unauthorized: wrong password");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn administrator_manages_users() {
    let Some(stack) = spawn_stack().await else {
        return;
    };
    let token = stack.token(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let resp = stack
        .client
        .post(stack.url("/auth/user"))
        .bearer_auth(&token)
        .json(&json!({
            "email": "librarian@mail.com",
            "password": "librarian-pass",
            "isAdmin": true,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let id = body["data"].as_i64().expect("user id");

    let resp = stack
        .client
        .get(stack.url(&format!("/auth/user/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["isAdmin"], true);

    // the new administrator can log in and act as one
    let librarian = stack.token("librarian@mail.com", "librarian-pass").await;
    let resp = stack
        .client
        .get(stack.url("/book"))
        .bearer_auth(&librarian)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = stack
        .client
        .delete(stack.url(&format!("/auth/user/{}", id)))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"], 1);
    assert_eq!(stack.user_count().await, 1);
}

#[tokio::test]
async fn bootstrap_administrator_is_seeded_once() {
    let Some(pool) = common::configure_database(&bookstore::helpers::db_pools::AUTH_MIGRATOR).await
    else {
        return;
    };

    let first = bookstore::services::ensure_admin(&pool).await.unwrap();
    let second = bookstore::services::ensure_admin(&pool).await.unwrap();
    assert_eq!(first, second);

    let admin = bookstore::db::user::fetch_by_email(&pool, ADMIN_EMAIL)
        .await
        .unwrap()
        .expect("administrator row");
    assert!(admin.is_admin);
    assert_eq!(admin.first_name, "Administrator");
    assert_ne!(admin.password, ADMIN_PASSWORD);
}

#[tokio::test]
async fn deleting_a_missing_record_is_not_found() {
    let Some(stack) = spawn_stack().await else {
        return;
    };
    let token = stack.token(ADMIN_EMAIL, ADMIN_PASSWORD).await;

    for (path, message) in [
        ("/book/999999", "Not Found: book not found"),
        ("/auth/user/999999", "Not Found: user not found"),
    ] {
        let resp = stack
            .client
            .delete(stack.url(path))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 404, "{}", path);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], message);
    }
    assert_eq!(stack.user_count().await, 1);
}
