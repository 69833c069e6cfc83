//! Request gate middleware
//!
//! Layer order matters: `authenticate` must wrap `authorize` so the policy
//! sees the identity the filter resolved.
//!
//! ```ignore
//! router
//!     .layer(axum::middleware::from_fn_with_state(policy, authorize))
//!     .layer(axum::middleware::from_fn_with_state(backend, authenticate))
//! ```

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::jwt::extract_bearer_token;
use crate::policy::RoutePolicy;

/// Token authentication filter.
///
/// Never rejects. A valid bearer token that resolves to an identity adds an
/// `AuthContext` to the request extensions; anything else leaves the request
/// unauthenticated.
pub async fn authenticate(
    State(backend): State<AuthBackend>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = match request.headers().get(AUTHORIZATION) {
        None => None,
        Some(header) => match extract_bearer_token(header) {
            Ok(token) => backend.authenticate(&token).await,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring non-bearer authorization header");
                None
            }
        },
    };

    if let Some(context) = context {
        request.extensions_mut().insert(context);
    }

    next.run(request).await
}

/// Route authorization policy enforcement.
///
/// Rejects with 401/403 before the request reaches any handler.
pub async fn authorize(
    State(policy): State<Arc<RoutePolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let decision = policy.authorize(
        request.method(),
        request.uri().path(),
        request.extensions().get::<AuthContext>(),
    );

    match decision {
        Ok(()) => next.run(request).await,
        Err(e) => {
            tracing::debug!(
                method = %request.method(),
                path = %request.uri().path(),
                error = %e,
                "Request rejected by route policy"
            );
            e.into_response()
        }
    }
}
