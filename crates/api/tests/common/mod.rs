#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response};
use axum::Router;
use chrono::{FixedOffset, NaiveDate, NaiveTime, Utc};
use edulog_api::auth::jwt::{generate_access_token, JwtConfig};
use edulog_api::auth::password::hash_password;
use edulog_api::config::ServerConfig;
use edulog_api::router::build_app_router;
use edulog_api::state::AppState;
use edulog_core::roles::{ROLE_ADMIN, ROLE_STUDENT};
use edulog_core::types::DbId;
use edulog_db::models::course::{Course, CreateCourse};
use edulog_db::models::session::{CreateSession, Session};
use edulog_db::models::student::{CreateStudent, Student};
use edulog_db::models::teacher::{CreateTeacher, Teacher};
use edulog_db::models::user::{CreateUser, User};
use edulog_db::repositories::{CourseRepo, SessionRepo, StudentRepo, TeacherRepo, UserRepo};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults.
///
/// The school clock runs on UTC so "today" matches `Utc::now()` in tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        app_env: "test".to_string(),
        late_grace_mins: 10,
        school_offset: FixedOffset::east_opt(0).unwrap(),
        jwt: test_jwt_config(),
    }
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        expiry_mins: 60,
    }
}

/// Build the full application router with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Today at the school, as seen by [`test_config`].
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, json_request(Method::DELETE, uri, Some(token), None)).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Token for a user, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.user_id, &user.role, user.student_id, &test_jwt_config()).unwrap()
}

/// Create an admin account and return it with a valid token.
pub async fn create_admin(pool: &PgPool, username: &str) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@school.test"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: ROLE_ADMIN.to_string(),
            student_id: None,
        },
    )
    .await
    .unwrap();
    let token = token_for(&user);
    (user, token)
}

pub async fn create_student(pool: &PgPool, name: &str, course_id: Option<DbId>) -> Student {
    StudentRepo::create(
        pool,
        &CreateStudent {
            name: name.to_string(),
            email: format!("{}@student.test", name.to_lowercase()),
            department: "Science".to_string(),
            course_id,
            year_of_study: 1,
            phone: None,
        },
    )
    .await
    .unwrap()
}

/// Create a student record plus a linked student account; returns the
/// student, the account and its token.
pub async fn create_student_user(
    pool: &PgPool,
    name: &str,
    course_id: Option<DbId>,
) -> (Student, User, String) {
    let student = create_student(pool, name, course_id).await;
    let username = name.to_lowercase();
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.clone(),
            email: format!("{username}@login.test"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role: ROLE_STUDENT.to_string(),
            student_id: Some(student.student_id),
        },
    )
    .await
    .unwrap();
    let token = token_for(&user);
    (student, user, token)
}

pub async fn create_course(pool: &PgPool, code: &str, name: &str) -> Course {
    CourseRepo::create(
        pool,
        &CreateCourse {
            course_code: code.to_string(),
            course_name: name.to_string(),
            department: "Science".to_string(),
        },
    )
    .await
    .unwrap()
}

pub async fn create_teacher(pool: &PgPool, email: &str) -> Teacher {
    TeacherRepo::create(
        pool,
        &CreateTeacher {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            department: "Science".to_string(),
        },
    )
    .await
    .unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Insert a scheduled session directly.
pub async fn create_session(
    pool: &PgPool,
    session_id: &str,
    course: &Course,
    teacher: &Teacher,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> Session {
    SessionRepo::create(
        pool,
        &CreateSession {
            session_id: session_id.to_string(),
            course_id: course.course_id,
            teacher_id: teacher.teacher_id,
            session_date: date,
            start_time: start,
            end_time: end,
            location: "Room 1".to_string(),
        },
    )
    .await
    .unwrap()
}
