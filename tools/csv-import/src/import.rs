use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::PathBuf;

use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, IntoActiveModel,
    Statement, TransactionTrait,
};
use tracing::{debug, info};

use crate::error::ImportError;
use crate::plan::{ImportPlan, Table};
use crate::rows::{
    CategoryRow, CommentRow, GenreRow, GenreTitleRow, ImportRow, ReviewRow, TitleRow, UserRow,
};

pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Rows inserted per table, in import order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub counts: Vec<(Table, usize)>,
}

impl ImportReport {
    pub fn count(&self, table: Table) -> Option<usize> {
        self.counts
            .iter()
            .find(|(t, _)| *t == table)
            .map(|(_, n)| *n)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }
}

pub struct Importer {
    pub db: DatabaseConnection,
    pub data_dir: PathBuf,
    pub chunk_size: usize,
}

impl Importer {
    pub fn new(db: DatabaseConnection, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            data_dir: data_dir.into(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Each file is committed on its own; a failure leaves earlier files in place.
    pub async fn run(&self, plan: &ImportPlan) -> Result<ImportReport, ImportError> {
        let mut known: HashMap<Table, HashSet<i32>> = HashMap::new();
        let mut report = ImportReport::default();

        for table in &plan.steps {
            let count = match table {
                Table::Users => self.import::<UserRow>(&mut known).await?,
                Table::Categories => self.import::<CategoryRow>(&mut known).await?,
                Table::Genres => self.import::<GenreRow>(&mut known).await?,
                Table::Titles => self.import::<TitleRow>(&mut known).await?,
                Table::Reviews => self.import::<ReviewRow>(&mut known).await?,
                Table::Comments => self.import::<CommentRow>(&mut known).await?,
                Table::GenreTitles => self.import::<GenreTitleRow>(&mut known).await?,
            };
            info!(table = %table, rows = count, "imported");
            report.counts.push((*table, count));
        }
        Ok(report)
    }

    async fn import<R: ImportRow>(
        &self,
        known: &mut HashMap<Table, HashSet<i32>>,
    ) -> Result<usize, ImportError>
    where
        <R::Entity as EntityTrait>::Model: IntoActiveModel<R::ActiveModel>,
    {
        // Known ids start from what the database already holds.
        for table in R::TABLE.depends_on().iter().chain([&R::TABLE]) {
            if !known.contains_key(table) {
                let ids = self.existing_ids(*table).await?;
                known.insert(*table, ids);
            }
        }

        let rows = self.read::<R>(known)?;
        let imported: HashSet<i32> = rows.iter().map(ImportRow::id).collect();
        let count = rows.len();

        self.insert::<R>(rows)
            .await
            .map_err(|source| ImportError::Database {
                table: R::TABLE,
                source,
            })?;

        known.entry(R::TABLE).or_default().extend(imported);
        Ok(count)
    }

    fn read<R: ImportRow>(
        &self,
        known: &HashMap<Table, HashSet<i32>>,
    ) -> Result<Vec<R>, ImportError> {
        let file = R::TABLE.file_name();
        let path = self.data_dir.join(file);
        let handle = File::open(&path).map_err(|source| ImportError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "reading");

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(handle);
        let joined_at = Utc::now();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record.map_err(|source| ImportError::Csv { file, source })?;
            let line = record.position().map_or(0, |p| p.line());
            let row = R::parse(&record, joined_at)
                .map_err(|message| ImportError::Row { file, line, message })?;

            for (column, table, id) in row.references() {
                let exists = known.get(&table).is_some_and(|ids| ids.contains(&id));
                if !exists {
                    return Err(ImportError::MissingReference {
                        file,
                        line,
                        column,
                        table,
                        id,
                    });
                }
            }
            rows.push(row);
        }
        Ok(rows)
    }

    async fn insert<R: ImportRow>(&self, rows: Vec<R>) -> Result<(), DbErr>
    where
        <R::Entity as EntityTrait>::Model: IntoActiveModel<R::ActiveModel>,
    {
        if rows.is_empty() {
            return Ok(());
        }
        let chunk_size = self.chunk_size.max(1);
        let txn = self.db.begin().await?;

        let mut rows = rows.into_iter().peekable();
        while rows.peek().is_some() {
            let batch: Vec<R::ActiveModel> = rows
                .by_ref()
                .take(chunk_size)
                .map(ImportRow::into_active_model)
                .collect();
            <R::Entity as EntityTrait>::insert_many(batch)
                .exec_without_returning(&txn)
                .await?;
        }

        if txn.get_database_backend() == DbBackend::Postgres {
            // Explicit ids leave the serial sequence behind.
            let table = R::TABLE.table_name();
            txn.execute(Statement::from_string(
                DbBackend::Postgres,
                format!(
                    "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
                     COALESCE(MAX(id), 1), MAX(id) IS NOT NULL) FROM {table}"
                ),
            ))
            .await?;
        }

        txn.commit().await
    }

    async fn existing_ids(&self, table: Table) -> Result<HashSet<i32>, ImportError> {
        let db_err = |source| ImportError::Database { table, source };
        let backend = self.db.get_database_backend();
        let rows = self
            .db
            .query_all(Statement::from_string(
                backend,
                format!("SELECT id FROM {}", table.table_name()),
            ))
            .await
            .map_err(db_err)?;
        rows.iter()
            .map(|row| row.try_get::<i32>("", "id").map_err(db_err))
            .collect()
    }
}
