//! Credential primitives shared by the API service and its tests.
//!
//! Provides the access-token issuer/verifier, confirmation codes, an
//! injectable clock, and the `BearerToken` extractor.

pub mod clock;
pub mod confirmation;
pub mod identity;
pub mod token;
