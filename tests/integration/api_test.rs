//! API endpoint integration tests
//!
//! Drives the composed router through `tower::ServiceExt::oneshot` with
//! in-memory stores and real signed tokens.

#![allow(dead_code)]

mod accounts;
mod applications;
mod common;
mod gate;
mod jobs;
