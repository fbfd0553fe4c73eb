//! Test utilities for YaMDb services.
//!
//! Import from `[dev-dependencies]` only; never in production code.

pub mod auth;

/// Secret shared by test token issuers and confirmation-code generators.
pub const TEST_SECRET: &str = "test-secret-key-for-integration-tests";
