//! Role guard tests: token shape, role tags, deleted and suspended accounts

use axum::http::StatusCode;
use uuid::Uuid;

use skillforge::backend::auth::sessions::{Claims, TokenService};
use skillforge::backend::auth::users::{delete_student, update_student_status};
use skillforge::shared::types::{Role, StudentStatus, Track};

use crate::common::*;

fn tokens(app: &TestApp) -> TokenService {
    TokenService::new(TEST_JWT_SECRET, app.config.jwt_expiry)
}

#[tokio::test]
async fn test_missing_and_malformed_tokens() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/auth/me").await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Not authorized to access this route");

    let response = bearer(app.server.get("/api/student/dashboard"), "not.a.jwt").await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Not authorized to access this route");

    let forged = TokenService::new("some-other-secret", app.config.jwt_expiry)
        .issue(Uuid::new_v4(), Role::Admin)
        .unwrap();
    let response = bearer(app.server.get("/api/admin/students"), &forged).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Not authorized to access this route");
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    let app = TestApp::new().await;
    let student = register_student(&app, Track::Photography).await;

    let expired = tokens(&app)
        .sign(&Claims {
            id: student.id,
            role: Role::Student,
            iat: 1_000,
            exp: 2_000,
        })
        .unwrap();
    let response = bearer(app.server.get("/api/auth/me"), &expired).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Not authorized to access this route");
}

#[tokio::test]
async fn test_roles_do_not_cross() {
    let app = TestApp::new().await;
    let student = register_student(&app, Track::WebDevelopment).await;
    let admin = login_admin(&app).await;

    let response = bearer(app.server.get("/api/admin/students"), &student.token).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Invalid token type");

    let response = bearer(app.server.get("/api/student/dashboard"), &admin.token).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Invalid token type");

    let response = bearer(app.server.get("/api/auth/me"), &admin.token).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Invalid token type");
}

#[tokio::test]
async fn test_token_for_deleted_student_stays_unauthorized() {
    let app = TestApp::new().await;
    let student = register_student(&app, Track::FinancialMarkets).await;

    assert!(delete_student(&app.pool, student.id).await.unwrap());

    for _ in 0..2 {
        let response = bearer(app.server.get("/api/auth/me"), &student.token).await;
        assert_failure(&response, StatusCode::UNAUTHORIZED, "User not found");
    }
}

#[tokio::test]
async fn test_token_for_unknown_admin() {
    let app = TestApp::new().await;
    let ghost = tokens(&app).issue(Uuid::new_v4(), Role::Admin).unwrap();

    let response = bearer(app.server.get("/api/admin/analytics"), &ghost).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "Admin not found");
}

#[tokio::test]
async fn test_suspended_student_is_forbidden_with_valid_token() {
    let app = TestApp::new().await;
    let student = register_student(&app, Track::Photography).await;

    let response = bearer(app.server.get("/api/student/handbooks"), &student.token).await;
    assert_success(&response, StatusCode::OK);

    update_student_status(&app.pool, student.id, StudentStatus::Suspended)
        .await
        .unwrap();

    let response = bearer(app.server.get("/api/student/handbooks"), &student.token).await;
    assert_failure(&response, StatusCode::FORBIDDEN, "Your account has been suspended");
}

#[tokio::test]
async fn test_store_failure_is_server_error_not_unauthorized() {
    let app = TestApp::new().await;
    let student = register_student(&app, Track::WebDevelopment).await;
    let admin = login_admin(&app).await;

    app.pool.close().await;

    let response = bearer(app.server.get("/api/auth/me"), &student.token).await;
    assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR, "Server error");

    let response = bearer(app.server.get("/api/admin/students"), &admin.token).await;
    assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR, "Server error");
}
