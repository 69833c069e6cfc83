//! Application submission integration tests

use axum::http::{Method, StatusCode};
use jobboard_auth::Role;
use serde_json::json;

use crate::common::{authed_raw_request, authed_request, TestApp};

mod test_apply {
    use super::*;

    #[tokio::test]
    async fn test_first_application_is_pending() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let seeker = app.create_user(Role::User).await;
        let job = app.create_job(&employer).await;

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                &format!("/api/jobs/{}/apply", job.id),
                &seeker,
                Some(json!({})),
            ))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "PENDING");
        assert_eq!(body["job_post_id"], job.id);
        assert_eq!(body["job_seeker_id"], seeker.id());
    }

    #[tokio::test]
    async fn test_second_application_conflicts() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let seeker = app.create_user(Role::User).await;
        let job = app.create_job(&employer).await;
        let uri = format!("/api/jobs/{}/apply", job.id);

        let (status, _) = app
            .send(authed_request(Method::POST, &uri, &seeker, Some(json!({}))))
            .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = app
            .send(authed_request(Method::POST, &uri, &seeker, Some(json!({}))))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("already applied"));

        assert_eq!(app.applications.count_for(seeker.id(), job.id).await, 1);
    }

    #[tokio::test]
    async fn test_apply_without_body_and_with_details() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let first = app.create_user(Role::User).await;
        let second = app.create_user(Role::User).await;
        let job = app.create_job(&employer).await;
        let uri = format!("/api/jobs/{}/apply", job.id);

        let (status, body) = app
            .send(authed_request(Method::POST, &uri, &first, None))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "PENDING");

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                &uri,
                &second,
                Some(json!({ "cover_letter": "I love Rust", "status": "SUBMITTED" })),
            ))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "SUBMITTED");
        assert_eq!(body["cover_letter"], "I love Rust");
    }

    #[tokio::test]
    async fn test_apply_to_missing_job_is_404() {
        let app = TestApp::new();
        let seeker = app.create_user(Role::User).await;

        let (status, _) = app
            .send(authed_request(
                Method::POST,
                "/api/jobs/9999/apply",
                &seeker,
                Some(json!({})),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(app.applications.is_empty().await);
    }
}

mod test_apply_body_errors {
    use super::*;

    #[tokio::test]
    async fn test_malformed_and_mistyped_bodies_are_validation_errors() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let seeker = app.create_user(Role::User).await;
        let job = app.create_job(&employer).await;
        let uri = format!("/api/jobs/{}/apply", job.id);

        for body in [r#"{"status":5}"#, "{not json", r#"{"status":""}"#] {
            let (status, response) = app
                .send(authed_raw_request(Method::POST, &uri, &seeker, body))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(response["error"]["code"], "VALIDATION_ERROR", "body: {}", body);
        }

        assert!(app.applications.is_empty().await);
    }

    #[tokio::test]
    async fn test_non_numeric_job_id_is_validation_error() {
        let app = TestApp::new();
        let seeker = app.create_user(Role::User).await;

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                "/api/jobs/abc/apply",
                &seeker,
                Some(json!({})),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}

mod test_list_applications {
    use super::*;

    #[tokio::test]
    async fn test_lists_only_own_applications() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let seeker = app.create_user(Role::User).await;
        let other = app.create_user(Role::User).await;
        let first = app.create_job(&employer).await;
        let second = app.create_job(&employer).await;

        for (user, job) in [(&seeker, &first), (&seeker, &second), (&other, &first)] {
            let (status, _) = app
                .send(authed_request(
                    Method::POST,
                    &format!("/api/jobs/{}/apply", job.id),
                    user,
                    Some(json!({})),
                ))
                .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = app
            .send(authed_request(Method::GET, "/api/applications", &seeker, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_elements"], 2);
        let content = body["content"].as_array().unwrap();
        assert!(content.iter().all(|a| a["job_seeker_id"] == seeker.id()));
        assert_eq!(content[0]["job_post_id"], second.id);
    }

    #[tokio::test]
    async fn test_employer_cannot_list_applications() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;

        let (status, _) = app
            .send(authed_request(Method::GET, "/api/applications", &employer, None))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
