#![allow(async_fn_in_trait)]

use sea_orm::{
    ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QuerySelect, Select, SqlErr,
};
use yamdb_domain::pagination::{Page, PageRequest};

/// Run a select as one page: total row count plus the requested slice.
pub trait FetchPage<E: EntityTrait> {
    async fn fetch_page<C>(self, db: &C, page: PageRequest) -> Result<Page<E::Model>, DbErr>
    where
        C: ConnectionTrait;
}

impl<E> FetchPage<E> for Select<E>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    async fn fetch_page<C>(self, db: &C, page: PageRequest) -> Result<Page<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let count = self.clone().count(db).await?;
        let results = self
            .offset(page.offset())
            .limit(page.limit())
            .all(db)
            .await?;
        Ok(Page { count, results })
    }
}

/// True when the error is a unique-constraint violation on any backend.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
