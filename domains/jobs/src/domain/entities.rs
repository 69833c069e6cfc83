//! Job board domain entities
//!
//! Categories are read-only reference data. Job postings belong to exactly one
//! employer. Applications link one job seeker to one posting, at most once.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Status given to an application when the caller does not supply one
pub const DEFAULT_APPLICATION_STATUS: &str = "PENDING";

/// Categories seeded into fresh stores
pub const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("Engineering", "Software, hardware and infrastructure roles"),
    ("Design", "Product, visual and UX design roles"),
    ("Marketing", "Brand, growth and content roles"),
    ("Sales", "Account management and business development roles"),
    ("Operations", "Finance, people and general operations roles"),
];

/// Job category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// Job posting owned by an employer
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct JobPost {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub salary: Option<Decimal>,
    pub employer_id: i64,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPost {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.employer_id == user_id
    }
}

/// Editable job posting fields, used for both create and full update
#[derive(Debug, Clone, PartialEq)]
pub struct JobPostDraft {
    pub title: String,
    pub description: String,
    pub location: Option<String>,
    pub skills: Option<String>,
    pub salary: Option<Decimal>,
    pub category_id: Option<i64>,
}

/// Application to a job posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Application {
    pub id: i64,
    pub job_seeker_id: i64,
    pub job_post_id: i64,
    pub status: String,
    pub cover_letter: Option<String>,
    pub applied_at: DateTime<Utc>,
}

/// Application about to be stored
#[derive(Debug, Clone)]
pub struct NewApplication {
    pub job_seeker_id: i64,
    pub job_post_id: i64,
    pub status: String,
    pub cover_letter: Option<String>,
}

impl NewApplication {
    /// Build an application, defaulting the status to PENDING
    pub fn new(
        job_seeker_id: i64,
        job_post_id: i64,
        status: Option<String>,
        cover_letter: Option<String>,
    ) -> Self {
        Self {
            job_seeker_id,
            job_post_id,
            status: status.unwrap_or_else(|| DEFAULT_APPLICATION_STATUS.to_string()),
            cover_letter,
        }
    }
}
