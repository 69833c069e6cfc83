//! Accounts domain: users, registration, login, self-service and admin user management

pub mod api;
pub mod domain;
pub mod repository;

pub use domain::entities::*;
pub use repository::{InMemoryUserStore, PgUserStore, StoreIdentityLookup, UserStore};

pub use api::routes;
pub use api::AccountsState;
