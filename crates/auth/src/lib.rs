//! Authentication and authorization core for the job board API
//!
//! Two middleware functions form the request gate:
//! - [`authenticate`] validates an optional bearer token and attaches an
//!   [`AuthContext`] to the request when the token resolves to an identity.
//! - [`authorize`] evaluates the ordered [`RoutePolicy`] against that context
//!   and rejects with 401/403 before any handler runs.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod extractors;
mod jwt;
mod middleware;
mod password;
mod policy;
mod types;

pub use backend::{AuthBackend, IdentityLookup};
pub use claims::TokenClaims;
pub use config::AuthConfig;
pub use context::AuthContext;
pub use error::AuthError;
pub use extractors::{AuthUser, MaybeAuthUser};
pub use jwt::IssuedToken;
pub use middleware::{authenticate, authorize};
pub use password::PasswordHasher;
pub use policy::{Captures, MethodMatcher, PathPattern, Requirement, RoutePolicy, Rule};
pub use types::{AuthIdentity, Role};
