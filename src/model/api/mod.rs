//! API-compatible types.
//!
//! The types in this module only exist at the HTTP boundary, e.g.:
//!
//! - Request bodies, which are checked here before reaching the store.
//! - Response views combining several pieces of core state.

pub mod auth;
pub mod report;
