//! HTTP-level integration tests for the admin CRUD resources: teachers,
//! courses, sessions and students.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_admin, create_course, create_session, create_teacher, delete_auth,
    get_auth, post_json_auth, put_json_auth, time, today,
};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Teachers
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn teacher_crud_round_trip(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/admin/teachers",
        &token,
        json!({ "name": "Grace Hopper", "email": "grace@school.test", "department": "Computing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["teacher_id"].as_i64().unwrap();

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/teachers/{id}"),
        &token,
        json!({ "department": "Mathematics" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["department"], "Mathematics");
    assert_eq!(json["data"]["name"], "Grace Hopper");

    let response = get_auth(app.clone(), "/api/admin/teachers?search=hop", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = delete_auth(app.clone(), &format!("/api/admin/teachers/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], true);

    let response = get_auth(app, &format!("/api/admin/teachers/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn teacher_with_invalid_email_is_rejected(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/teachers",
        &token,
        json!({ "name": "Nobody", "email": "not-an-email", "department": "X" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "email must be a valid address");
}

// ---------------------------------------------------------------------------
// Courses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_course_code_is_409(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    create_course(&pool, "CS101", "Intro to CS").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/courses",
        &token,
        json!({ "course_code": "CS101", "course_name": "Again", "department": "Computing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn course_with_sessions_cannot_be_deleted(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    let course = create_course(&pool, "CS101", "Intro to CS").await;
    let teacher = create_teacher(&pool, "t@school.test").await;
    create_session(&pool, "CS101-S1", &course, &teacher, today(), time(9, 0), time(10, 0)).await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/admin/courses/{}", course.course_id);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = delete_auth(app.clone(), "/api/admin/sessions/CS101-S1", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete_auth(app, &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn course_summaries_are_open_to_students(pool: PgPool) {
    create_course(&pool, "CS101", "Intro to CS").await;
    create_course(&pool, "MA101", "Calculus").await;
    let (_student, _user, token) = common::create_student_user(&pool, "Ana", None).await;
    let app = common::build_test_app(pool);

    let response = get_auth(app, "/api/courses", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_session_generates_id_and_defaults(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    create_course(&pool, "CS101", "Intro to CS").await;
    create_teacher(&pool, "t@school.test").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/admin/sessions",
        &token,
        json!({
            "course_code": "CS101",
            "teacher_email": "T@School.test",
            "session_date": "2030-01-15",
            "start_time": "09:00:00",
            "end_time": "10:30:00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let id = json["data"]["session_id"].as_str().unwrap().to_string();
    let prefix = format!("CS101-{}-", today().format("%Y%m%d"));
    assert!(id.starts_with(&prefix), "unexpected session id {id}");
    assert_eq!(id.len(), prefix.len() + 4);
    assert_eq!(json["data"]["location"], "TBD");
    assert_eq!(json["data"]["status"], "scheduled");

    let response = get_auth(app, &format!("/api/admin/sessions/{id}"), &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["course_name"], "Intro to CS");
    assert_eq!(json["data"]["teacher_email"], "t@school.test");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_session_validates_inputs(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    create_course(&pool, "CS101", "Intro to CS").await;
    create_teacher(&pool, "t@school.test").await;
    let app = common::build_test_app(pool);

    let inverted = post_json_auth(
        app.clone(),
        "/api/admin/sessions",
        &token,
        json!({
            "course_code": "CS101",
            "teacher_email": "t@school.test",
            "session_date": "2030-01-15",
            "start_time": "11:00:00",
            "end_time": "10:00:00",
        }),
    )
    .await;
    assert_eq!(inverted.status(), StatusCode::BAD_REQUEST);

    let unknown_course = post_json_auth(
        app,
        "/api/admin/sessions",
        &token,
        json!({
            "course_code": "NOPE",
            "teacher_email": "t@school.test",
            "session_date": "2030-01-15",
            "start_time": "09:00:00",
            "end_time": "10:00:00",
        }),
    )
    .await;
    assert_eq!(unknown_course.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_session_status_is_validated(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    let course = create_course(&pool, "CS101", "Intro to CS").await;
    let teacher = create_teacher(&pool, "t@school.test").await;
    create_session(&pool, "CS101-S1", &course, &teacher, today(), time(9, 0), time(10, 0)).await;
    let app = common::build_test_app(pool);

    let bad = put_json_auth(
        app.clone(),
        "/api/admin/sessions/CS101-S1",
        &token,
        json!({ "status": "postponed" }),
    )
    .await;
    assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

    let good = put_json_auth(
        app,
        "/api/admin/sessions/CS101-S1",
        &token,
        json!({ "status": "cancelled", "end_time": "11:00:00" }),
    )
    .await;
    assert_eq!(good.status(), StatusCode::OK);
    let json = body_json(good).await;
    assert_eq!(json["data"]["status"], "cancelled");
    assert_eq!(json["data"]["end_time"], "11:00:00");
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn student_crud_with_home_course(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    let course = create_course(&pool, "CS101", "Intro to CS").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app.clone(),
        "/api/admin/students",
        &token,
        json!({
            "name": "Zoe",
            "email": "zoe@student.test",
            "department": "Computing",
            "course_id": course.course_id,
            "year_of_study": 2,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["student_id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/admin/students", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"][0]["course_name"], "Intro to CS");

    let response = put_json_auth(
        app.clone(),
        &format!("/api/admin/students/{id}"),
        &token,
        json!({ "year_of_study": 11 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = delete_auth(app, &format!("/api/admin/students/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn student_with_unknown_course_is_400(pool: PgPool) {
    let (_admin, token) = create_admin(&pool, "admin").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/admin/students",
        &token,
        json!({
            "name": "Zoe",
            "email": "zoe@student.test",
            "department": "Computing",
            "course_id": 4242,
            "year_of_study": 2,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
