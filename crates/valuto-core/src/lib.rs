//! Core types, structural validation, and errors for the Valuto lesson renderer.
//!
//! This crate provides the foundational types used across all other valuto crates:
//! - The declarative tree model (`Node`, `Child`, `Tree`, `Action`)
//! - Index paths for locating nodes in a tree
//! - Validation of untrusted JSON documents into trees
//! - Error types

pub mod errors;
pub mod node;
pub mod path;
pub mod validate;

pub use errors::*;
pub use node::*;
pub use path::*;
