//! Job posting integration tests

use axum::http::{Method, StatusCode};
use jobboard_auth::Role;
use jobboard_jobs::JobPostStore;
use serde_json::json;

use crate::common::{authed_request, unauthed_request, TestApp};

mod test_job_creation {
    use super::*;

    #[tokio::test]
    async fn test_employer_creates_job() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                "/api/jobs",
                &employer,
                Some(json!({
                    "title": "Platform Engineer",
                    "description": "Own the deploy pipeline",
                    "location": "Lisbon",
                    "salary": "95000.00",
                    "category_id": 1
                })),
            ))
            .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["title"], "Platform Engineer");
        assert_eq!(body["employer_id"], employer.id());
        assert_eq!(body["employer_name"], employer.user.username.as_str());
        assert_eq!(body["category_name"], "Engineering");
        assert_eq!(body["location"], "Lisbon");
        assert_eq!(app.jobs.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_job_rejects_invalid_input() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;

        let (status, body) = app
            .send(authed_request(
                Method::POST,
                "/api/jobs",
                &employer,
                Some(json!({ "title": "", "description": "x" })),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, _) = app
            .send(authed_request(
                Method::POST,
                "/api/jobs",
                &employer,
                Some(json!({ "title": "Ok", "description": "x", "category_id": 999 })),
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.jobs.is_empty().await);
    }
}

mod test_job_reads {
    use super::*;

    #[tokio::test]
    async fn test_get_job_with_fallbacks() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let job = app
            .jobs
            .create(
                employer.id(),
                jobboard_jobs::JobPostDraft {
                    title: "Support Lead".to_string(),
                    description: "Help customers".to_string(),
                    location: None,
                    skills: None,
                    salary: None,
                    category_id: None,
                },
            )
            .await
            .unwrap();

        let (status, body) = app
            .send(unauthed_request(
                Method::GET,
                &format!("/api/jobs/{}", job.id),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"], "Not_Specified");
        assert_eq!(body["category_name"], "Not Specified");
        assert_eq!(body["category_description"], "Not Specified");
        assert_eq!(body["employer_name"], employer.user.username.as_str());
    }

    #[tokio::test]
    async fn test_get_missing_job_is_404() {
        let app = TestApp::new();
        let (status, _) = app
            .send(unauthed_request(Method::GET, "/api/jobs/4242", None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_path_and_query_use_error_body() {
        let app = TestApp::new();

        let (status, body) = app
            .send(unauthed_request(Method::GET, "/api/jobs/abc", None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let (status, body) = app
            .send(unauthed_request(Method::GET, "/api/jobs?page=first", None))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_list_jobs_paginates() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        for _ in 0..3 {
            app.create_job(&employer).await;
        }

        let (status, body) = app
            .send(unauthed_request(Method::GET, "/api/jobs?page=1&size=2", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"], 1);
        assert_eq!(body["size"], 2);
        assert_eq!(body["total_elements"], 3);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["content"].as_array().unwrap().len(), 1);
    }
}

mod test_job_ownership {
    use super::*;

    #[tokio::test]
    async fn test_owner_updates_job() {
        let app = TestApp::new();
        let owner = app.create_user(Role::Employer).await;
        let job = app.create_job(&owner).await;

        let (status, body) = app
            .send(authed_request(
                Method::PUT,
                &format!("/api/jobs/{}", job.id),
                &owner,
                Some(json!({
                    "title": "Senior Backend Engineer",
                    "description": "Build and run Rust services",
                    "category_id": 2
                })),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Senior Backend Engineer");
        assert_eq!(body["category_name"], "Design");
    }

    #[tokio::test]
    async fn test_other_employer_cannot_update() {
        let app = TestApp::new();
        let owner = app.create_user(Role::Employer).await;
        let other = app.create_user(Role::Employer).await;
        let job = app.create_job(&owner).await;

        let (status, body) = app
            .send(authed_request(
                Method::PUT,
                &format!("/api/jobs/{}", job.id),
                &other,
                Some(json!({ "title": "Hijacked", "description": "nope" })),
            ))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "AUTHORIZATION_ERROR");
        let stored = app.jobs.find_by_id(job.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Backend Engineer");
    }

    #[tokio::test]
    async fn test_other_employer_cannot_delete() {
        let app = TestApp::new();
        let owner = app.create_user(Role::Employer).await;
        let other = app.create_user(Role::Employer).await;
        let job = app.create_job(&owner).await;

        let (status, _) = app
            .send(authed_request(
                Method::DELETE,
                &format!("/api/jobs/{}", job.id),
                &other,
                None,
            ))
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(app.jobs.find_by_id(job.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_owner_deletes_job() {
        let app = TestApp::new();
        let owner = app.create_user(Role::Employer).await;
        let job = app.create_job(&owner).await;

        let (status, _) = app
            .send(authed_request(
                Method::DELETE,
                &format!("/api/jobs/{}", job.id),
                &owner,
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .send(unauthed_request(
                Method::GET,
                &format!("/api/jobs/{}", job.id),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_missing_job_is_404() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;

        let (status, _) = app
            .send(authed_request(
                Method::PUT,
                "/api/jobs/777",
                &employer,
                Some(json!({ "title": "Ghost", "description": "Nobody" })),
            ))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
