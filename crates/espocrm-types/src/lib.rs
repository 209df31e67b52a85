//! Shared types for the EspoCRM REST API
//!
//! This crate provides the core type definitions used across the client
//! workspace. It has minimal dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Method`] - HTTP verbs understood by the API
//! - [`Params`] - Ordered query parameters with list-API helpers
//! - [`WhereClause`], [`FilterType`], [`Order`] - List filtering and sorting
//! - [`ListResult`] - Shape of list responses, for callers that decode them

pub mod entity;
pub mod method;
pub mod params;

// Re-export commonly used types
pub use entity::*;
pub use method::*;
pub use params::*;
