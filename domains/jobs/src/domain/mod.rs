//! Jobs domain types

pub mod entities;
