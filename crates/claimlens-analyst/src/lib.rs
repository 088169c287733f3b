//! claimlens-analyst
//!
//! Request/response adapter for the natural-language-to-SQL analyst service.

pub mod client;
pub mod error;
pub mod wire;
