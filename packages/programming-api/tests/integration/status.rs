use serde_json::json;

use crate::harness::TestApp;

#[tokio::test]
async fn pending_submission_reports_only_status() {
    let app = TestApp::spawn().await;
    let sub = app.pending("alice", 1, "print(1)").await;

    let res = app.get(&format!("/grading/status/{}", sub.id)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!({ "status": "pending" }));
}

#[tokio::test]
async fn processed_submission_reports_result() {
    let app = TestApp::spawn().await;
    let passed = app.graded("alice", 1, true).await;
    let failed = app.graded("bob", 1, false).await;

    let res = app.get(&format!("/grading/status/{passed}")).await;
    assert_eq!(
        res.body,
        json!({ "status": "processed", "correct": true, "grader_feedback": "OK" })
    );

    let res = app.get(&format!("/grading/status/{failed}")).await;
    assert_eq!(res.body["status"], "processed");
    assert_eq!(res.body["correct"], false);
    assert_eq!(res.body["grader_feedback"], "FAILED (failures=1)");
}

#[tokio::test]
async fn unknown_submission_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/grading/status/9999").await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_id_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app.get("/grading/status/abc").await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/nope").await;

    assert_eq!(res.status, 404);
    assert_eq!(res.text, "Not found");
}

#[tokio::test]
async fn serves_openapi_document() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;

    assert_eq!(res.status, 200);
    assert!(res.body["paths"]["/grading/status/{id}"].is_object());
    assert!(res.body["paths"]["/scores/{user_uuid}"].is_object());
}
