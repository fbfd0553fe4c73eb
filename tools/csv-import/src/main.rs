//! Loads the CSV fixtures into the catalog database.
//!
//! ```bash
//! csv-import --data-dir static/data --database-url postgres://localhost/yamdb
//! csv-import --only users --only categories
//! ```

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use sea_orm::Database;
use tracing::info;

use yamdb_csv_import::import::DEFAULT_CHUNK_SIZE;
use yamdb_csv_import::{ImportPlan, Importer, Table};

#[derive(Parser)]
#[command(about = "Import CSV fixtures into the catalog database")]
struct Args {
    /// Directory holding users.csv, category.csv, genre.csv and the rest
    #[arg(long, env = "CSV_FILES_DIR", default_value = "static/data")]
    data_dir: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Rows per INSERT statement
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Import only these tables (by table name); may be repeated
    #[arg(long)]
    only: Vec<Table>,
}

#[tokio::main]
async fn main() -> Result<()> {
    yamdb_core::tracing::init_tracing();
    let args = Args::parse();

    let plan = if args.only.is_empty() {
        ImportPlan::full()?
    } else {
        ImportPlan::new(&args.only)?
    };

    let db = Database::connect(&args.database_url)
        .await
        .context("failed to connect to database")?;

    let importer = Importer {
        db,
        data_dir: args.data_dir,
        chunk_size: args.chunk_size,
    };
    let report = importer.run(&plan).await.context("import failed")?;

    info!(rows = report.total(), tables = report.counts.len(), "import finished");
    Ok(())
}
