//! Domain types shared across YaMDb crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; never in `infra/` or `handlers/`.

pub mod catalog;
pub mod id;
pub mod pagination;
pub mod policy;
pub mod review;
pub mod user;
