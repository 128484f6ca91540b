//! Admin portal tests: student management, catalog management, analytics

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use skillforge::backend::progress::db::count_progress_for_user;
use skillforge::shared::types::Track;

use crate::common::*;

fn pdf_part() -> Part {
    Part::bytes(b"%PDF-1.4\n%test handbook\n".to_vec())
        .file_name("guide.pdf")
        .mime_type("application/pdf")
}

#[tokio::test]
async fn test_list_students_filters_and_hides_hashes() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let web = register_student(&app, Track::WebDevelopment).await;
    register_student(&app, Track::Photography).await;
    register_student(&app, Track::Photography).await;

    let response = bearer(app.server.get("/api/admin/students"), &admin.token).await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["count"], 3);
    for student in body["data"].as_array().unwrap() {
        assert!(student.get("password").is_none());
        assert!(student.get("passwordHash").is_none());
    }

    let response = bearer(app.server.get("/api/admin/students"), &admin.token)
        .add_query_param("track", "Photography")
        .await;
    assert_eq!(assert_success(&response, StatusCode::OK)["count"], 2);

    let needle = web.email[..20].to_uppercase();
    let response = bearer(app.server.get("/api/admin/students"), &admin.token)
        .add_query_param("search", &needle)
        .await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], web.id.to_string());

    let response = bearer(app.server.get("/api/admin/students"), &admin.token)
        .add_query_param("status", "suspended")
        .await;
    assert_eq!(assert_success(&response, StatusCode::OK)["count"], 0);

    let response = bearer(app.server.get("/api/admin/students"), &admin.token)
        .add_query_param("track", "Cooking")
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_student_detail_includes_progress() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let handbook = create_handbook(&app, "Aperture", Track::Photography, 8).await;
    let student = register_student(&app, Track::Photography).await;

    bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": handbook.id, "lastPageRead": 4 }))
        .await;

    let response = bearer(
        app.server.get(&format!("/api/admin/students/{}", student.id)),
        &admin.token,
    )
    .await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["data"]["student"]["email"], student.email);
    assert_eq!(body["data"]["progress"][0]["handbook"]["title"], "Aperture");
    assert_eq!(body["data"]["progress"][0]["completionPercentage"], 50);

    let response = bearer(
        app.server.get(&format!("/api/admin/students/{}", Uuid::new_v4())),
        &admin.token,
    )
    .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Student not found");
}

#[tokio::test]
async fn test_update_student_status() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let student = register_student(&app, Track::FinancialMarkets).await;
    let path = format!("/api/admin/students/{}", student.id);

    let response = bearer(app.server.put(&path), &admin.token)
        .json(&json!({ "status": "banned" }))
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Invalid status value");

    let response = bearer(app.server.put(&path), &admin.token)
        .json(&json!({ "status": "suspended" }))
        .await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["message"], "Student status updated");
    assert_eq!(body["data"]["status"], "suspended");

    let response = bearer(app.server.get("/api/auth/me"), &student.token).await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = bearer(app.server.put(&path), &admin.token)
        .json(&json!({ "status": "active" }))
        .await;
    assert_success(&response, StatusCode::OK);
    let response = bearer(app.server.get("/api/auth/me"), &student.token).await;
    assert_success(&response, StatusCode::OK);

    let response = bearer(
        app.server.put(&format!("/api/admin/students/{}", Uuid::new_v4())),
        &admin.token,
    )
    .json(&json!({ "status": "active" }))
    .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Student not found");
}

#[tokio::test]
async fn test_delete_student_removes_progress() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let handbook = create_handbook(&app, "Ledgers", Track::FinancialMarkets, 10).await;
    let student = register_student(&app, Track::FinancialMarkets).await;

    bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": handbook.id, "lastPageRead": 3 }))
        .await;
    assert_eq!(count_progress_for_user(&app.pool, student.id).await.unwrap(), 1);

    let path = format!("/api/admin/students/{}", student.id);
    let response = bearer(app.server.delete(&path), &admin.token).await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["message"], "Student deleted successfully");

    let response = bearer(app.server.get(&path), &admin.token).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Student not found");
    assert_eq!(count_progress_for_user(&app.pool, student.id).await.unwrap(), 0);

    let response = bearer(app.server.delete(&path), &admin.token).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Student not found");

    let response = bearer(app.server.get("/api/auth/me"), &student.token).await;
    assert_failure(&response, StatusCode::UNAUTHORIZED, "User not found");
}

#[tokio::test]
async fn test_upload_list_update_delete_handbook() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;

    let form = MultipartForm::new()
        .add_text("title", "Intro to Rust Web")
        .add_text("description", "Servers and routers")
        .add_text("track", "Web Development")
        .add_text("totalPages", "120")
        .add_part("handbook", pdf_part());
    let response = bearer(app.server.post("/api/admin/handbooks"), &admin.token)
        .multipart(form)
        .await;
    let body = assert_success(&response, StatusCode::CREATED);
    assert_eq!(body["message"], "Handbook uploaded successfully");
    assert_eq!(body["data"]["totalPages"], 120);
    assert_eq!(body["data"]["viewCount"], 0);

    let id = body["data"]["id"].as_str().unwrap().to_string();
    let file_name = body["data"]["fileName"].as_str().unwrap().to_string();
    assert!(file_name.starts_with("handbook-") && file_name.ends_with(".pdf"));
    let stored = app.uploads.path().join(&file_name);
    assert!(stored.exists());

    let served = app.server.get(&format!("/uploads/{}", file_name)).await;
    assert_eq!(served.status_code(), StatusCode::OK);
    assert!(served.as_bytes().starts_with(b"%PDF"));

    let response = bearer(app.server.get("/api/admin/handbooks"), &admin.token)
        .add_query_param("track", "Web Development")
        .await;
    assert_eq!(assert_success(&response, StatusCode::OK)["count"], 1);
    let response = bearer(app.server.get("/api/admin/handbooks"), &admin.token)
        .add_query_param("track", "Photography")
        .await;
    assert_eq!(assert_success(&response, StatusCode::OK)["count"], 0);

    let path = format!("/api/admin/handbooks/{}", id);
    let response = bearer(app.server.put(&path), &admin.token)
        .json(&json!({ "title": "Rust on the Web" }))
        .await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Rust on the Web");
    assert_eq!(body["data"]["description"], "Servers and routers");
    assert_eq!(body["data"]["totalPages"], 120);

    let response = bearer(app.server.delete(&path), &admin.token).await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["message"], "Handbook deleted successfully");
    assert!(!stored.exists());

    let response = bearer(app.server.delete(&path), &admin.token).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Handbook not found");
    let response = bearer(app.server.put(&path), &admin.token)
        .json(&json!({ "title": "Gone" }))
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Handbook not found");
}

#[tokio::test]
async fn test_failed_handbook_delete_keeps_file() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let handbook = create_handbook(&app, "Pinned", Track::Photography, 5).await;
    std::fs::write(&handbook.file_path, b"%PDF-1.4\n").unwrap();

    sqlx::query(
        "CREATE TRIGGER block_handbook_delete BEFORE DELETE ON handbooks \
         BEGIN SELECT RAISE(ABORT, 'handbook is pinned'); END",
    )
    .execute(&app.pool)
    .await
    .unwrap();

    let path = format!("/api/admin/handbooks/{}", handbook.id);
    let response = bearer(app.server.delete(&path), &admin.token).await;
    assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR, "Server error");

    assert!(std::path::Path::new(&handbook.file_path).exists());
    let response = bearer(app.server.get("/api/admin/handbooks"), &admin.token).await;
    assert_eq!(assert_success(&response, StatusCode::OK)["count"], 1);
}

#[tokio::test]
async fn test_upload_rejections() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;

    let form = MultipartForm::new()
        .add_text("title", "No file")
        .add_text("track", "Photography");
    let response = bearer(app.server.post("/api/admin/handbooks"), &admin.token)
        .multipart(form)
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Please upload a PDF file");

    let png = Part::bytes(b"\x89PNG".to_vec())
        .file_name("photo.png")
        .mime_type("image/png");
    let form = MultipartForm::new()
        .add_text("title", "Wrong type")
        .add_text("track", "Photography")
        .add_part("handbook", png);
    let response = bearer(app.server.post("/api/admin/handbooks"), &admin.token)
        .multipart(form)
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Only PDF files are allowed");

    let form = MultipartForm::new()
        .add_text("track", "Photography")
        .add_part("handbook", pdf_part());
    let response = bearer(app.server.post("/api/admin/handbooks"), &admin.token)
        .multipart(form)
        .await;
    assert_failure(&response, StatusCode::BAD_REQUEST, "Title and track are required");

    let form = MultipartForm::new()
        .add_text("title", "Bad track")
        .add_text("track", "Cooking")
        .add_part("handbook", pdf_part());
    let response = bearer(app.server.post("/api/admin/handbooks"), &admin.token)
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    // Nothing was written for any rejected upload.
    let stored = std::fs::read_dir(app.uploads.path()).unwrap().count();
    assert_eq!(stored, 0);
}

#[tokio::test]
async fn test_analytics() {
    let app = TestApp::new().await;
    let admin = login_admin(&app).await;
    let handbook = create_handbook(&app, "Markets 101", Track::FinancialMarkets, 10).await;
    let trader = register_student(&app, Track::FinancialMarkets).await;
    register_student(&app, Track::Photography).await;

    bearer(
        app.server.get(&format!("/api/student/handbook/{}", handbook.id)),
        &trader.token,
    )
    .await;
    app.server
        .post("/api/auth/login")
        .json(&json!({ "email": trader.email, "password": trader.password }))
        .await;
    app.server.get("/").await;

    let response = bearer(app.server.get("/api/admin/analytics"), &admin.token).await;
    let body: Value = assert_success(&response, StatusCode::OK);
    let data = &body["data"];

    assert_eq!(data["totalStudents"], 2);
    assert_eq!(data["totalHandbooks"], 1);
    assert_eq!(data["recentRegistrations"], 2);
    assert_eq!(data["activeStudents"], 1);
    assert_eq!(data["totalHandbookViews"], 1);
    assert_eq!(
        data["studentsByTrack"],
        json!([
            { "track": "Financial Markets", "count": 1 },
            { "track": "Photography", "count": 1 },
        ])
    );
    let trend = data["registrationsTrend"].as_array().unwrap();
    assert_eq!(trend.len(), 1);
    assert_eq!(trend[0]["count"], 2);
    assert_eq!(data["visitors"]["uniqueVisitors"], 1);
    assert_eq!(data["visitors"]["totalVisits"], 1);
}
