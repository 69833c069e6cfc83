//! Job board application composition root
//!
//! Builds the record stores, the auth backend and route policy, and composes
//! the domain routers behind the request gate.

use anyhow::Context;
use axum::{http::header, http::HeaderValue, http::Method, middleware, Router};
use jobboard_accounts::{
    AccountsState, InMemoryUserStore, NewUser, PgUserStore, StoreIdentityLookup, UserStore,
};
use jobboard_auth::{
    authenticate, authorize, AuthBackend, AuthConfig, PasswordHasher, Role, RoutePolicy,
};
use jobboard_common::{Config, Error, StoreProvider};
use jobboard_jobs::{
    ApplicationStore, InMemoryApplicationStore, InMemoryJobPostStore, JobPostStore, JobsState,
    PgApplicationStore, PgJobPostStore,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
};

/// Maximum accepted request body size
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Record-store collaborators shared by every domain
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub jobs: Arc<dyn JobPostStore>,
    pub applications: Arc<dyn ApplicationStore>,
}

impl Stores {
    /// Process-local stores with the default categories seeded
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserStore::new()),
            jobs: Arc::new(InMemoryJobPostStore::seeded()),
            applications: Arc::new(InMemoryApplicationStore::new()),
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            jobs: Arc::new(PgJobPostStore::new(pool.clone())),
            applications: Arc::new(PgApplicationStore::new(pool)),
        }
    }

    /// Build the stores selected by `STORE_PROVIDER`, running migrations for postgres
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        match config.store_provider {
            StoreProvider::Memory => {
                tracing::warn!("Using in-memory stores; data is lost on restart");
                Ok(Self::in_memory())
            }
            StoreProvider::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required when STORE_PROVIDER=postgres")?;

                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .acquire_timeout(Duration::from_secs(5))
                    .connect(url)
                    .await
                    .context("Database connection failed")?;
                tracing::info!("Database connection established");

                sqlx::migrate!("../../migrations")
                    .run(&pool)
                    .await
                    .context("Database migration failed")?;
                tracing::info!("Database migrations applied");

                Ok(Self::postgres(pool))
            }
        }
    }
}

/// Token settings from `JWT_SECRET`, `JWT_ISSUER`, `JWT_AUDIENCE` and `JWT_TTL_SECONDS`
pub fn auth_config_from_env() -> anyhow::Result<AuthConfig> {
    let jwt_secret = std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .context("JWT_SECRET environment variable is required")?;

    let mut config = AuthConfig::new(jwt_secret);
    config.issuer = std::env::var("JWT_ISSUER").ok().filter(|s| !s.is_empty());
    config.audience = std::env::var("JWT_AUDIENCE").ok().filter(|s| !s.is_empty());
    if let Ok(ttl) = std::env::var("JWT_TTL_SECONDS") {
        config.token_ttl_seconds = ttl
            .parse::<i64>()
            .ok()
            .filter(|ttl| *ttl > 0)
            .with_context(|| format!("Invalid JWT_TTL_SECONDS: {}", ttl))?;
    }

    Ok(config)
}

/// Create the main application router with all routes and the request gate
pub fn create_app(stores: Stores, auth_config: AuthConfig) -> Router {
    create_app_with_hasher(stores, auth_config, PasswordHasher::new())
}

/// Same as [`create_app`] with explicit password hashing cost
pub fn create_app_with_hasher(
    stores: Stores,
    auth_config: AuthConfig,
    hasher: PasswordHasher,
) -> Router {
    let lookup = Arc::new(StoreIdentityLookup::new(stores.users.clone()));
    let backend = AuthBackend::new(lookup, auth_config);
    let policy = Arc::new(RoutePolicy::job_board());

    let accounts_state = AccountsState {
        users: stores.users,
        auth: backend.clone(),
        hasher,
    };

    let jobs_state = JobsState {
        jobs: stores.jobs,
        applications: stores.applications,
        auth: backend.clone(),
    };

    // authenticate wraps authorize, so it runs first
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(jobboard_accounts::routes().with_state(accounts_state))
        .merge(jobboard_jobs::routes().with_state(jobs_state))
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(policy, authorize))
        .layer(middleware::from_fn_with_state(backend, authenticate))
}

/// Create the bootstrap administrator when configured and not yet present
pub async fn bootstrap_admin(
    users: &dyn UserStore,
    hasher: &PasswordHasher,
    config: &Config,
) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (
        config.bootstrap_admin_email.as_deref(),
        config.bootstrap_admin_password.as_deref(),
    ) else {
        return Ok(());
    };

    let email = email.trim().to_ascii_lowercase();
    if let Some(existing) = users.find_by_email(&email).await? {
        if existing.role != Role::Admin {
            tracing::warn!(
                user_id = existing.id,
                "Bootstrap admin email belongs to a non-admin account; leaving it unchanged"
            );
        }
        return Ok(());
    }

    let password_hash = hasher.hash(password.to_string()).await?;
    let username = email
        .split('@')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("admin")
        .to_string();

    let admin = users
        .create(NewUser {
            username,
            email,
            password_hash,
            role: Role::Admin,
        })
        .await?;
    tracing::info!(user_id = admin.id, "Bootstrap admin account created");

    Ok(())
}

/// CORS layer from a comma separated origin list, or `*` for any origin
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let allow_origin = if origins.trim() == "*" {
        AllowOrigin::any()
    } else {
        let list: Vec<HeaderValue> = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    None
                }
            })
            .collect();
        AllowOrigin::list(list)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Reject request bodies over 1 MiB
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn not_found() -> Error {
    Error::NotFound("Route not found".to_string())
}
