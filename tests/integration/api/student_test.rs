//! Student portal tests: track scoping, views and reading progress

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use skillforge::shared::types::Track;

use crate::common::*;

#[tokio::test]
async fn test_student_only_sees_own_track() {
    let app = TestApp::new().await;
    let web = create_handbook(&app, "HTML Basics", Track::WebDevelopment, 40).await;
    create_handbook(&app, "Candlesticks", Track::FinancialMarkets, 25).await;
    create_handbook(&app, "Lighting", Track::Photography, 10).await;
    let student = register_student(&app, Track::WebDevelopment).await;

    let response = bearer(app.server.get("/api/student/handbooks"), &student.token).await;
    let body = assert_success(&response, StatusCode::OK);

    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["id"], web.id.to_string());
    assert_eq!(body["data"][0]["title"], "HTML Basics");
    assert_eq!(body["data"][0]["totalPages"], 40);
    // Summaries leave out storage details.
    assert!(body["data"][0].get("filePath").is_none());
}

#[tokio::test]
async fn test_handbook_view_counts_and_scoping() {
    let app = TestApp::new().await;
    let own = create_handbook(&app, "Composition", Track::Photography, 12).await;
    let other = create_handbook(&app, "Options", Track::FinancialMarkets, 30).await;
    let student = register_student(&app, Track::Photography).await;

    for expected in 1..=2 {
        let response = bearer(
            app.server.get(&format!("/api/student/handbook/{}", own.id)),
            &student.token,
        )
        .await;
        let body = assert_success(&response, StatusCode::OK);
        assert_eq!(body["data"]["viewCount"], expected);
        assert_eq!(body["data"]["track"], "Photography");
    }

    let response = bearer(
        app.server.get(&format!("/api/student/handbook/{}", other.id)),
        &student.token,
    )
    .await;
    assert_failure(&response, StatusCode::FORBIDDEN, "You do not have access to this handbook");

    let response = bearer(
        app.server.get(&format!("/api/student/handbook/{}", Uuid::new_v4())),
        &student.token,
    )
    .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Handbook not found");

    let response = bearer(app.server.get("/api/student/handbook/not-an-id"), &student.token).await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Handbook not found");
}

#[tokio::test]
async fn test_progress_upsert_accumulates_without_duplicates() {
    let app = TestApp::new().await;
    let handbook = create_handbook(&app, "CSS Layout", Track::WebDevelopment, 200).await;
    let student = register_student(&app, Track::WebDevelopment).await;

    let first = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": handbook.id, "lastPageRead": 50, "timeSpent": 15 }))
        .await;
    let first = assert_success(&first, StatusCode::OK);
    assert_eq!(first["message"], "Progress updated");
    assert_eq!(first["data"]["completionPercentage"], 25);
    assert_eq!(first["data"]["totalTimeSpent"], 15);

    let second = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": handbook.id, "lastPageRead": 133, "timeSpent": 10 }))
        .await;
    let second = assert_success(&second, StatusCode::OK);
    assert_eq!(second["data"]["id"], first["data"]["id"]);
    assert_eq!(second["data"]["lastPageRead"], 133);
    // 133 / 200 = 66.5 rounds up.
    assert_eq!(second["data"]["completionPercentage"], 67);
    assert_eq!(second["data"]["totalTimeSpent"], 25);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reading_progress")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let read = bearer(
        app.server.get(&format!("/api/student/progress/{}", handbook.id)),
        &student.token,
    )
    .await;
    let read = assert_success(&read, StatusCode::OK);
    assert_eq!(read["data"]["lastPageRead"], 133);
    assert_eq!(read["data"]["handbook"]["title"], "CSS Layout");
    assert_eq!(read["data"]["handbook"]["totalPages"], 200);
}

#[tokio::test]
async fn test_progress_completion_edges() {
    let app = TestApp::new().await;
    let unpaged = create_handbook(&app, "Draft", Track::Photography, 0).await;
    let short = create_handbook(&app, "Short", Track::Photography, 10).await;
    let student = register_student(&app, Track::Photography).await;

    let response = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": unpaged.id, "lastPageRead": 7 }))
        .await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["data"]["completionPercentage"], 0);
    assert_eq!(body["data"]["totalTimeSpent"], 0);

    let response = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": short.id, "lastPageRead": 25 }))
        .await;
    let body = assert_success(&response, StatusCode::OK);
    assert_eq!(body["data"]["completionPercentage"], 100);
}

#[tokio::test]
async fn test_progress_rejections() {
    let app = TestApp::new().await;
    let foreign = create_handbook(&app, "Forex", Track::FinancialMarkets, 10).await;
    let student = register_student(&app, Track::WebDevelopment).await;

    let response = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "lastPageRead": -1 }))
        .await;
    let body = assert_failure(&response, StatusCode::BAD_REQUEST, "Validation failed");
    assert_eq!(error_fields(&body), vec!["handbookId", "lastPageRead"]);

    let response = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": foreign.id, "lastPageRead": 1 }))
        .await;
    assert_failure(&response, StatusCode::FORBIDDEN, "You do not have access to this handbook");

    let response = bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": Uuid::new_v4(), "lastPageRead": 1 }))
        .await;
    assert_failure(&response, StatusCode::NOT_FOUND, "Handbook not found");
}

#[tokio::test]
async fn test_missing_progress_is_null_data() {
    let app = TestApp::new().await;
    let handbook = create_handbook(&app, "JS", Track::WebDevelopment, 10).await;
    let student = register_student(&app, Track::WebDevelopment).await;

    for id in [handbook.id.to_string(), "garbage".to_string()] {
        let response = bearer(
            app.server.get(&format!("/api/student/progress/{}", id)),
            &student.token,
        )
        .await;
        let body = assert_success(&response, StatusCode::OK);
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["message"], "No progress found for this handbook");
    }
}

#[tokio::test]
async fn test_dashboard() {
    let app = TestApp::new().await;
    let handbook = create_handbook(&app, "Portraits", Track::Photography, 20).await;
    create_handbook(&app, "Bonds", Track::FinancialMarkets, 20).await;
    let student = register_student(&app, Track::Photography).await;

    bearer(app.server.post("/api/student/progress"), &student.token)
        .json(&json!({ "handbookId": handbook.id, "lastPageRead": 5, "timeSpent": 3 }))
        .await;

    let response = bearer(app.server.get("/api/student/dashboard"), &student.token).await;
    let body = assert_success(&response, StatusCode::OK);

    assert_eq!(body["data"]["student"]["fullName"], "Test Student");
    assert_eq!(body["data"]["student"]["track"], "Photography");
    assert!(body["data"]["student"]["registrationDate"].is_string());
    assert_eq!(body["data"]["handbooks"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["progress"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["progress"][0]["completionPercentage"], 25);
    assert_eq!(body["data"]["progress"][0]["handbook"]["track"], "Photography");
}
