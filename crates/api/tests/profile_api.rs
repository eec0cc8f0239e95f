//! HTTP-level integration tests for the admin and student profile views.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_admin, create_student_user, get_auth, post_json, put_json_auth,
    TEST_PASSWORD,
};
use edulog_db::repositories::UserRepo;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_updates_email_and_password(pool: PgPool) {
    let (admin, token) = create_admin(&pool, "root").await;
    let app = common::build_test_app(pool);

    let response = get_auth(app.clone(), "/api/admin/profile", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["user_id"], admin.user_id);
    assert_eq!(json["data"]["name"], "root");
    assert_eq!(json["data"]["role"], "admin");

    let response = put_json_auth(
        app.clone(),
        "/api/admin/profile",
        &token,
        json!({ "email": "head@school.test", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "head@school.test");

    let old = post_json(
        app.clone(),
        "/api/login",
        json!({ "username": "root", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = post_json(
        app,
        "/api/login",
        json!({ "username": "root", "password": "brand-new-password" }),
    )
    .await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_email_must_be_unique(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "root").await;
    create_admin(&pool, "other").await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app,
        "/api/admin/profile",
        &token,
        json!({ "email": "other@school.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_updates_contact_details(pool: PgPool) {
    let (_student, _user, token) = create_student_user(&pool, "Ana", None).await;
    let app = common::build_test_app(pool);

    let response = put_json_auth(
        app.clone(),
        "/api/student/profile",
        &token,
        json!({ "email": "ana@new.test", "phone": "555-0101", "password": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "ana@new.test");
    assert_eq!(json["data"]["phone"], "555-0101");
    assert_eq!(json["data"]["name"], "Ana");

    // A blank password leaves the old one in place.
    let login = post_json(
        app.clone(),
        "/api/login",
        json!({ "username": "ana", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);

    let response = put_json_auth(
        app,
        "/api/student/profile",
        &token,
        json!({ "email": "ana@new.test", "password": "short" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_email_change_updates_login_account(pool: PgPool) {
    let (_student, user, token) = create_student_user(&pool, "Ana", None).await;
    let app = common::build_test_app(pool.clone());

    let response = put_json_auth(
        app,
        "/api/student/profile",
        &token,
        json!({ "email": "ana@moved.test" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let account = UserRepo::find_by_id(&pool, user.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(account.email, "ana@moved.test");
}
