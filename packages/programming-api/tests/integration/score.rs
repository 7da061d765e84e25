use crate::harness::TestApp;

#[tokio::test]
async fn unknown_user_has_zero() {
    let app = TestApp::spawn().await;

    let res = app.get("/scores/nobody").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text, "0");
}

#[tokio::test]
async fn counts_solved_assignments() {
    let app = TestApp::spawn().await;
    app.graded("alice", 1, true).await;
    app.graded("alice", 2, false).await;
    app.graded("alice", 3, true).await;
    app.graded("bob", 2, true).await;

    let res = app.get("/scores/alice").await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, 2);
}

#[tokio::test]
async fn repeated_correct_answers_count_once() {
    let app = TestApp::spawn().await;
    app.graded("alice", 1, true).await;
    app.graded("alice", 1, true).await;

    let res = app.get("/scores/alice").await;

    assert_eq!(res.body, 1);
}
