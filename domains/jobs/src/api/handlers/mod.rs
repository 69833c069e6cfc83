//! HTTP handlers for the Jobs domain

pub mod applications;
pub mod categories;
pub mod jobs;
