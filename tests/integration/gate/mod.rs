//! Request gate integration tests
//!
//! Token authentication filter plus route authorization policy, observed
//! through the HTTP surface.

use axum::http::{Method, StatusCode};
use jobboard_auth::Role;
use jobboard_common::PageRequest;
use jobboard_jobs::JobPostStore;
use serde_json::json;

use crate::common::{
    authed_request, create_test_jwt, request, unauthed_request, TestApp, TEST_JWT_SECRET,
};

fn job_body() -> serde_json::Value {
    json!({
        "title": "Data Engineer",
        "description": "Pipelines and warehouses",
        "category_id": 1
    })
}

mod test_public_routes {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::new();
        let (status, _) = app.send(unauthed_request(Method::GET, "/health", None)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_job_listing_without_token() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        app.create_job(&employer).await;

        let (status, body) = app
            .send(unauthed_request(Method::GET, "/api/jobs", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_elements"], 1);
    }

    #[tokio::test]
    async fn test_categories_without_token() {
        let app = TestApp::new();
        let (status, body) = app
            .send(unauthed_request(Method::GET, "/api/categories", None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.as_array().is_some_and(|c| !c.is_empty()));
    }
}

mod test_missing_or_invalid_tokens {
    use super::*;

    #[tokio::test]
    async fn test_create_job_without_token_is_401_and_stores_nothing() {
        let app = TestApp::new();
        let (status, body) = app
            .send(unauthed_request(Method::POST, "/api/jobs", Some(job_body())))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"]["code"], "MISSING_AUTHORIZATION");
        assert!(app.jobs.is_empty().await);
    }

    #[tokio::test]
    async fn test_apply_without_token_is_401_and_stores_nothing() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let job = app.create_job(&employer).await;

        let (status, _) = app
            .send(unauthed_request(
                Method::POST,
                &format!("/api/jobs/{}/apply", job.id),
                Some(json!({})),
            ))
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.applications.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_token_is_treated_as_absent() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let expired = create_test_jwt(&employer.user.email, TEST_JWT_SECRET, -120);

        let (status, _) = app
            .send(request(
                Method::POST,
                "/api/jobs",
                Some(&format!("Bearer {}", expired)),
                Some(job_body()),
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(app.jobs.is_empty().await);

        // Public routes still work with the same header
        let (status, _) = app
            .send(request(
                Method::GET,
                "/api/jobs",
                Some(&format!("Bearer {}", expired)),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_wrong_signature_is_treated_as_absent() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let forged = create_test_jwt(&employer.user.email, "some-other-secret", 3600);

        let (status, _) = app
            .send(request(
                Method::GET,
                "/api/users/me",
                Some(&format!("Bearer {}", forged)),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_garbage_and_non_bearer_headers() {
        let app = TestApp::new();
        let user = app.create_user(Role::User).await;

        for header in [
            "Bearer not-a-jwt".to_string(),
            "Bearer ".to_string(),
            format!("Token {}", user.token),
            user.token.clone(),
        ] {
            let (status, _) = app
                .send(request(Method::GET, "/api/users/me", Some(&header), None))
                .await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "header: {}", header);
        }
    }

    #[tokio::test]
    async fn test_token_for_deleted_account_is_rejected() {
        let app = TestApp::new();
        let user = app.create_user(Role::User).await;

        let (status, _) = app
            .send(authed_request(Method::GET, "/api/users/me", &user, None))
            .await;
        assert_eq!(status, StatusCode::OK);

        use jobboard_accounts::UserStore;
        app.users.delete(user.id()).await.unwrap();

        let (status, _) = app
            .send(authed_request(Method::GET, "/api/users/me", &user, None))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

mod test_role_requirements {
    use super::*;

    #[tokio::test]
    async fn test_user_cannot_create_job() {
        let app = TestApp::new();
        let seeker = app.create_user(Role::User).await;

        let (status, body) = app
            .send(authed_request(Method::POST, "/api/jobs", &seeker, Some(job_body())))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"]["code"], "FORBIDDEN");
        assert!(app.jobs.is_empty().await);
    }

    #[tokio::test]
    async fn test_admin_is_not_an_employer_or_user() {
        let app = TestApp::new();
        let admin = app.create_user(Role::Admin).await;
        let employer = app.create_user(Role::Employer).await;
        let job = app.create_job(&employer).await;

        let (status, _) = app
            .send(authed_request(Method::POST, "/api/jobs", &admin, Some(job_body())))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send(authed_request(
                Method::DELETE,
                &format!("/api/jobs/{}", job.id),
                &admin,
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send(authed_request(
                Method::POST,
                &format!("/api/jobs/{}/apply", job.id),
                &admin,
                Some(json!({})),
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(app.applications.is_empty().await);
        assert!(app.jobs.find_by_id(job.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_employer_cannot_apply() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let job = app.create_job(&employer).await;

        let (status, _) = app
            .send(authed_request(
                Method::POST,
                &format!("/api/jobs/{}/apply", job.id),
                &employer,
                Some(json!({})),
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_routes_require_admin() {
        let app = TestApp::new();
        let admin = app.create_user(Role::Admin).await;
        let employer = app.create_user(Role::Employer).await;

        let (status, _) = app
            .send(authed_request(Method::GET, "/api/admin/users", &employer, None))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send(unauthed_request(Method::GET, "/api/admin/users", None))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .send(authed_request(Method::GET, "/api/admin/users", &admin, None))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_elements"], 2);
    }
}

mod test_head_requests {
    use super::*;

    #[tokio::test]
    async fn test_head_on_other_user_is_forbidden() {
        let app = TestApp::new();
        let owner = app.create_user(Role::User).await;
        let other = app.create_user(Role::User).await;

        let (status, _) = app
            .send(authed_request(
                Method::HEAD,
                &format!("/api/users/{}", owner.id()),
                &other,
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Existence of other accounts is not revealed
        let (status, _) = app
            .send(authed_request(Method::HEAD, "/api/users/99999", &other, None))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send(authed_request(
                Method::HEAD,
                &format!("/api/users/{}", owner.id()),
                &owner,
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_head_on_applications_requires_user_role() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;

        let (status, _) = app
            .send(authed_request(Method::HEAD, "/api/applications", &employer, None))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send(unauthed_request(Method::HEAD, "/api/applications", None))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_head_on_public_listing() {
        let app = TestApp::new();
        let (status, _) = app
            .send(unauthed_request(Method::HEAD, "/api/jobs", None))
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

mod test_default_rule {
    use super::*;

    #[tokio::test]
    async fn test_unknown_route_requires_authentication() {
        let app = TestApp::new();
        let user = app.create_user(Role::User).await;

        let (status, _) = app
            .send(unauthed_request(Method::GET, "/api/unknown", None))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) = app
            .send(authed_request(Method::GET, "/api/unknown", &user, None))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_public_rules_are_method_specific() {
        let app = TestApp::new();
        let employer = app.create_user(Role::Employer).await;
        let job = app.create_job(&employer).await;

        // GET is public but DELETE on the same path is not
        let (status, _) = app
            .send(unauthed_request(
                Method::DELETE,
                &format!("/api/jobs/{}", job.id),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let listing = app.jobs.list(PageRequest::default()).await.unwrap();
        assert_eq!(listing.total_elements, 1);
    }
}
