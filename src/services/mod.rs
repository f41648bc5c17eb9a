//! Business logic services.

pub mod auth;
pub mod filter;
pub mod matcher;
pub mod registry;
