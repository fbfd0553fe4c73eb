use std::path::PathBuf;

use crate::plan::Table;

/// Any failure aborts the run; nothing is skipped.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}: {source}")]
    Csv {
        file: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{file} line {line}: {message}")]
    Row {
        file: &'static str,
        line: u64,
        message: String,
    },

    #[error("{file} line {line}: {column} {id} does not exist in {table}")]
    MissingReference {
        file: &'static str,
        line: u64,
        column: &'static str,
        table: Table,
        id: i32,
    },

    #[error("circular dependency between {0:?}")]
    DependencyCycle(Vec<String>),

    #[error("database error while importing {table}: {source}")]
    Database {
        table: Table,
        #[source]
        source: sea_orm::DbErr,
    },
}
