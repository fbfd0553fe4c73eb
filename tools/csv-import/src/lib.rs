//! Bulk loader for the CSV fixtures shipped with the catalog.

pub mod error;
pub mod import;
pub mod plan;
pub mod rows;

pub use error::ImportError;
pub use import::{ImportReport, Importer};
pub use plan::{ImportPlan, Table};
