//! HTTP-level integration tests for login, registration and role guards.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_admin, create_student, create_student_user, get, get_auth, post_json,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn login_returns_token_and_role(pool: PgPool) {
    let (student, _user, _token) = create_student_user(&pool, "Lena", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/login",
        json!({ "username": "lena", "password": TEST_PASSWORD }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["data"]["token"].is_string());
    assert_eq!(json["data"]["role"], "student");
    assert_eq!(json["data"]["student_id"], student.student_id);
    assert_eq!(json["data"]["expires_in"], 3600);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_with_wrong_password_is_401(pool: PgPool) {
    create_admin(&pool, "root").await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/login",
        json!({ "username": "root", "password": "not-the-password" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_for_unknown_user_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/login",
        json!({ "username": "ghost", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    // Indistinguishable from a wrong password.
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid username or password");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn issued_token_opens_the_student_portal(pool: PgPool) {
    create_student_user(&pool, "Omar", None).await;
    let app = common::build_test_app(pool);

    let login = post_json(
        app.clone(),
        "/api/login",
        json!({ "username": "omar", "password": TEST_PASSWORD }),
    )
    .await;
    let token = body_json(login).await["data"]["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(app, "/api/student/profile", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Omar");
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn register_student_links_existing_record(pool: PgPool) {
    let student = create_student(&pool, "Nia", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/register",
        json!({
            "username": "nia",
            "email": "nia@login.test",
            "password": "long-enough-pw",
            "role": "student",
            "student_id": student.student_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["role"], "student");
    assert_eq!(json["data"]["student_id"], student.student_id);
    assert!(json["data"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_student_twice_is_409(pool: PgPool) {
    let (student, _user, _token) = create_student_user(&pool, "Ivo", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/register",
        json!({
            "username": "ivo2",
            "email": "ivo2@login.test",
            "password": "long-enough-pw",
            "role": "student",
            "student_id": student.student_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_student_without_record_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let missing_id = post_json(
        app.clone(),
        "/api/register",
        json!({
            "username": "kim",
            "email": "kim@login.test",
            "password": "long-enough-pw",
            "role": "student",
        }),
    )
    .await;
    assert_eq!(missing_id.status(), StatusCode::BAD_REQUEST);

    let unknown = post_json(
        app,
        "/api/register",
        json!({
            "username": "kim",
            "email": "kim@login.test",
            "password": "long-enough-pw",
            "role": "student",
            "student_id": 9999,
        }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_duplicate_username_is_409(pool: PgPool) {
    create_student_user(&pool, "Ivo", None).await;
    let other = create_student(&pool, "Ivan", None).await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app,
        "/api/register",
        json!({
            "username": "ivo",
            "email": "ivan@login.test",
            "password": "long-enough-pw",
            "role": "student",
            "student_id": other.student_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(accounts, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_requires_every_field(pool: PgPool) {
    let app = common::build_test_app(pool);

    let no_role = post_json(
        app.clone(),
        "/api/register",
        json!({ "username": "kim", "email": "kim@login.test", "password": "long-enough-pw" }),
    )
    .await;
    assert_eq!(no_role.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(no_role).await["code"], "BAD_REQUEST");

    let bad_role = post_json(
        app,
        "/api/register",
        json!({
            "username": "kim",
            "email": "kim@login.test",
            "password": "long-enough-pw",
            "role": "janitor",
        }),
    )
    .await;
    assert_eq!(bad_role.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(bad_role).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_rejects_short_password(pool: PgPool) {
    let student = create_student(&pool, "Tao", None).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/register",
        json!({
            "username": "tao",
            "email": "tao@login.test",
            "password": "short",
            "role": "student",
            "student_id": student.student_id,
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn only_the_first_admin_can_self_register(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = |name: &str| {
        json!({
            "username": name,
            "email": format!("{name}@school.test"),
            "password": "long-enough-pw",
            "role": "admin",
        })
    };

    let first = post_json(app.clone(), "/api/register", body("first")).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = post_json(app, "/api/register", body("second")).await;
    assert_eq!(second.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Role guards
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_routes_require_a_token(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/admin/teachers").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["success"], false);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_token_is_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/teachers", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn students_cannot_reach_admin_routes(pool: PgPool) {
    let (_student, _user, token) = create_student_user(&pool, "Eve", None).await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/admin/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admins_cannot_reach_student_routes(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "boss").await;
    let app = common::build_test_app(pool);
    let response = get_auth(app, "/api/student/dashboard", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
