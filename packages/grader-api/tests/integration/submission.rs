use crate::harness::{SUBMIT, ScriptedGrader, TestApp, wait_for_calls, wait_until_processed};
use common::store::DedupScope;
use serde_json::json;

mod submission_intake {
    use super::*;

    #[tokio::test]
    async fn accepted_submission_is_graded() {
        let app = TestApp::spawn().await;

        let id = app.submit_ok("u1", "correct answer").await;
        let graded = wait_until_processed(&app.db, id).await;

        assert_eq!(graded.programming_assignment_id, 1);
        assert_eq!(graded.user_uuid, "u1");
        assert_eq!(graded.correct, Some(true));
        assert!(graded.grader_feedback.unwrap().trim_end().ends_with("OK"));
    }

    #[tokio::test]
    async fn failing_output_is_recorded_as_incorrect() {
        let app = TestApp::spawn().await;

        let id = app.submit_ok("u1", "wrong").await;
        let graded = wait_until_processed(&app.db, id).await;

        assert_eq!(graded.correct, Some(false));
        assert!(graded.grader_feedback.unwrap().contains("FAILED"));
    }

    #[tokio::test]
    async fn identical_wrong_answer_returns_same_id_without_regrading() {
        let app = TestApp::spawn().await;

        let first = app.submit_ok("u1", "wrong").await;
        let graded = wait_until_processed(&app.db, first).await;
        assert_eq!(graded.correct, Some(false));

        let second = app.submit_ok("u1", "wrong").await;
        assert_eq!(second, first);
        assert_eq!(app.grader.calls(), vec!["wrong".to_string()]);
        assert_eq!(app.submission_count("u1").await, 1);
    }

    #[tokio::test]
    async fn identical_answer_while_pending_returns_same_id() {
        let app = TestApp::spawn_paused().await;

        let first = app.submit_ok("u1", "attempt").await;
        let second = app.submit_ok("u1", "attempt").await;
        assert_eq!(first, second);

        app.grader.release(1);
        wait_until_processed(&app.db, first).await;
        assert_eq!(app.grader.calls().len(), 1);
    }

    #[tokio::test]
    async fn pending_user_is_asked_to_retry() {
        let app = TestApp::spawn_paused().await;

        app.submit_ok("u1", "first").await;
        let res = app.submit("u1", "second").await;

        assert_eq!(res.body["status"], "failed");
        assert_eq!(
            res.body["msg"],
            "You have ongoing submission. Try again later"
        );
        assert_eq!(app.submission_count("u1").await, 1);

        // Other users are not blocked.
        app.submit_ok("u2", "first").await;
    }

    #[tokio::test]
    async fn user_can_submit_again_once_graded() {
        let app = TestApp::spawn().await;

        let first = app.submit_ok("u1", "first try").await;
        wait_until_processed(&app.db, first).await;

        let second = app.submit_ok("u1", "second try").await;
        assert_ne!(first, second);
    }
}

mod sequencing {
    use super::*;

    #[tokio::test]
    async fn correct_answer_advances_to_next_assignment() {
        let app = TestApp::spawn().await;

        let first = app.submit_ok("u1", "correct one").await;
        wait_until_processed(&app.db, first).await;

        let second = app.submit_ok("u1", "correct two").await;
        let graded = wait_until_processed(&app.db, second).await;
        assert_eq!(graded.programming_assignment_id, 2);

        let third = app.submit_ok("u1", "wrong three").await;
        let graded = wait_until_processed(&app.db, third).await;
        assert_eq!(graded.programming_assignment_id, 3);
        assert_eq!(graded.correct, Some(false));

        // Still on assignment 3 after a wrong answer.
        let retry = app.submit_ok("u1", "correct three").await;
        let graded = wait_until_processed(&app.db, retry).await;
        assert_eq!(graded.programming_assignment_id, 3);
    }

    #[tokio::test]
    async fn finished_user_gets_explicit_failure() {
        let app = TestApp::spawn().await;

        for n in 1..=3 {
            let id = app.submit_ok("u1", &format!("correct {n}")).await;
            wait_until_processed(&app.db, id).await;
        }

        let res = app.submit("u1", "correct 4").await;
        assert_eq!(res.body["status"], "failed");
        assert_eq!(res.body["msg"], "All assignments have been completed");
        assert_eq!(app.submission_count("u1").await, 3);
    }
}

mod deduplication_scope {
    use super::*;

    #[tokio::test]
    async fn default_scope_shares_ids_across_users() {
        let app = TestApp::spawn().await;

        let first = app.submit_ok("u1", "wrong").await;
        wait_until_processed(&app.db, first).await;

        let other = app.submit_ok("u2", "wrong").await;
        assert_eq!(other, first);
        assert_eq!(app.submission_count("u2").await, 0);
    }

    #[tokio::test]
    async fn copied_passing_answer_does_not_advance_second_user() {
        let app = TestApp::spawn().await;

        let first = app.submit_ok("u1", "correct").await;
        let graded = wait_until_processed(&app.db, first).await;
        assert_eq!(graded.correct, Some(true));

        let copied = app.submit_ok("u2", "correct").await;
        assert_eq!(copied, first);
        assert_eq!(app.submission_count("u2").await, 0);
        assert_eq!(app.grader.calls().len(), 1);

        let u1_next = common::store::next_assignment(&app.db, "u1").await.unwrap();
        let u2_next = common::store::next_assignment(&app.db, "u2").await.unwrap();
        assert_eq!(u1_next.map(|a| a.id), Some(2));
        assert_eq!(u2_next.map(|a| a.id), Some(1));
    }

    #[tokio::test]
    async fn user_scope_keeps_users_apart() {
        let app = TestApp::spawn_with(ScriptedGrader::new(), |config| {
            config.submission.dedup_scope = DedupScope::User;
        })
        .await;

        let first = app.submit_ok("u1", "wrong").await;
        wait_until_processed(&app.db, first).await;

        let other = app.submit_ok("u2", "wrong").await;
        assert_ne!(other, first);
        wait_until_processed(&app.db, other).await;
        assert_eq!(app.grader.calls().len(), 2);
    }
}

mod grading_failures {
    use super::*;

    #[tokio::test]
    async fn grader_error_leaves_submission_pending() {
        let app = TestApp::spawn().await;

        let id = app.submit_ok("u1", "crash").await;
        wait_for_calls(&app.grader, 1).await;

        // Give the worker time to finish handling the failure.
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
        let stored = common::store::find_submission(&app.db, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, common::SubmissionStatus::Pending);
        assert_eq!(stored.correct, None);
        assert_eq!(stored.grader_feedback, None);

        // The stuck row keeps blocking the user.
        let res = app.submit("u1", "something else").await;
        assert_eq!(res.body["status"], "failed");
    }

    #[tokio::test]
    async fn stopped_queue_still_accepts_submission() {
        let app = TestApp::spawn().await;
        app.queue.stop();

        let id = app.submit_ok("u1", "correct").await;
        let stored = common::store::find_submission(&app.db, id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, common::SubmissionStatus::Pending);
        assert!(app.grader.calls().is_empty());

        tokio::time::timeout(std::time::Duration::from_secs(5), app.worker)
            .await
            .expect("worker did not stop")
            .expect("worker panicked");
    }
}

mod request_validation {
    use super::*;

    #[tokio::test]
    async fn rejects_missing_fields() {
        let app = TestApp::spawn().await;
        let res = app.post(SUBMIT, &json!({ "user_uuid": "u1" })).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_malformed_json() {
        let app = TestApp::spawn().await;
        let res = app.post_raw(SUBMIT, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_blank_user() {
        let app = TestApp::spawn().await;
        let res = app
            .post(SUBMIT, &json!({ "user_uuid": "  ", "answer": "x" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_oversized_answer() {
        let app = TestApp::spawn_with(ScriptedGrader::new(), |config| {
            config.submission.max_size = 8;
        })
        .await;
        let res = app
            .post(SUBMIT, &json!({ "user_uuid": "u1", "answer": "123456789" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(app.submission_count("u1").await, 0);
    }

    #[tokio::test]
    async fn unknown_route_is_plain_404() {
        let app = TestApp::spawn().await;
        let res = app.get("/submit/nothing").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.text, "Not found");
    }
}
