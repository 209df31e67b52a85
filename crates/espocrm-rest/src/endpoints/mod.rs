//! API endpoint helpers

pub mod entity;

pub use entity::EntityEndpoints;
