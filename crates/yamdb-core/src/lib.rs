//! Service plumbing shared by YaMDb binaries: tracing, configuration,
//! middleware, health probes, serde helpers and sea-orm extensions.

pub mod config;
pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
