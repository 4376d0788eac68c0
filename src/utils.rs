//! Utility functions and types.
pub mod base;
pub mod checks;
pub mod data;
pub mod select;
pub mod shape;
