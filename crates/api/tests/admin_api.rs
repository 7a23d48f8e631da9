//! HTTP-level tests for staff management and first-admin provisioning.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, employee_token, login, post_json_auth, TEST_PASSWORD};
use paella_api::bootstrap::{ensure_admin, BootstrapOutcome};
use paella_api::config::BootstrapAdmin;
use paella_core::roles::{ROLE_ADMIN, ROLE_EMPLOYEE};
use paella_db::repositories::ProfileRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_invites_employee_who_can_sign_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/admin/employees",
        json!({
            "email": " Pepe@Paellas.test ",
            "password": "socarrat-2024",
            "full_name": "Pepe Martí",
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let employee = body_json(response).await["data"].clone();
    assert_eq!(employee["email"], "pepe@paellas.test");
    assert_eq!(employee["role"], ROLE_EMPLOYEE);
    assert_eq!(employee["full_name"], "Pepe Martí");

    let json = login(app, "pepe@paellas.test", "socarrat-2024").await;
    assert_eq!(json["user"]["role"], ROLE_EMPLOYEE);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invite_validation_and_duplicates(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = admin_token(&pool, app.clone()).await;

    for body in [
        json!({ "email": "", "password": "socarrat-2024" }),
        json!({ "email": "pepe@paellas.test", "password": "corta" }),
    ] {
        let response =
            post_json_auth(app.clone(), "/api/v1/admin/employees", body, &admin).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let duplicate = post_json_auth(
        app,
        "/api/v1/admin/employees",
        json!({ "email": "admin@paellas.test", "password": "socarrat-2024" }),
        &admin,
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn employees_cannot_invite(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let employee = employee_token(&pool, app.clone()).await;

    let response = post_json_auth(
        app,
        "/api/v1/admin/employees",
        json!({ "email": "otro@paellas.test", "password": "socarrat-2024" }),
        &employee,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_creates_first_admin_once(pool: PgPool) {
    let admin = BootstrapAdmin {
        email: "Jefa@Paellas.test".into(),
        password: TEST_PASSWORD.into(),
    };

    assert_eq!(
        ensure_admin(&pool, &admin).await.unwrap(),
        BootstrapOutcome::Created
    );
    assert!(ProfileRepo::exists_with_role(&pool, ROLE_ADMIN).await.unwrap());
    assert_eq!(
        ensure_admin(&pool, &admin).await.unwrap(),
        BootstrapOutcome::AlreadyProvisioned
    );

    let app = common::build_test_app(pool);
    let json = login(app, "jefa@paellas.test", TEST_PASSWORD).await;
    assert_eq!(json["user"]["role"], ROLE_ADMIN);
}
