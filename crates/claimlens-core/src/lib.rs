//! claimlens-core
//!
//! Pure domain types, warehouse object names, and audit prompt templates.
//! No network dependency. This is the shared vocabulary of the ClaimLens system.

pub mod connection;
pub mod error;
pub mod models;
pub mod objects;
pub mod prompts;
