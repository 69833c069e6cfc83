//! Accounts domain types

pub mod entities;
