//! claimlens-warehouse
//!
//! Read-only access to the claim tables and the evidence stage. Thin wrapper
//! around the warehouse SQL REST API, plus TTL memoization of lookups.

pub mod access;
pub mod cache;
pub mod claims;
pub mod client;
pub mod cortex;
pub mod error;
pub mod executor;
pub mod query;
pub mod stage;
pub mod statement;
