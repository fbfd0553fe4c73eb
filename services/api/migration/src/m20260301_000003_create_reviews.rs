use sea_orm_migration::prelude::*;

use crate::m20260301_000001_create_users::Users;
use crate::m20260301_000002_create_catalog::Titles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::TitleId).integer().not_null())
                    .col(ColumnDef::new(Reviews::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Reviews::Text).text().not_null())
                    .col(ColumnDef::new(Reviews::Score).small_integer().not_null())
                    .col(
                        ColumnDef::new(Reviews::PubDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_title_id")
                            .from(Reviews::Table, Reviews::TitleId)
                            .to(Titles::Table, Titles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_author_id")
                            .from(Reviews::Table, Reviews::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One review per author per title.
        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::AuthorId)
                    .col(Reviews::TitleId)
                    .name("unique_review")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Reviews::Table)
                    .col(Reviews::PubDate)
                    .name("idx_reviews_pub_date")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comments::ReviewId).integer().not_null())
                    .col(ColumnDef::new(Comments::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Comments::Text).text().not_null())
                    .col(
                        ColumnDef::new(Comments::PubDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_review_id")
                            .from(Comments::Table, Comments::ReviewId)
                            .to(Reviews::Table, Reviews::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_author_id")
                            .from(Comments::Table, Comments::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Comments::Table)
                    .col(Comments::PubDate)
                    .name("idx_comments_pub_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    TitleId,
    AuthorId,
    Text,
    Score,
    PubDate,
}

#[derive(Iden)]
enum Comments {
    Table,
    Id,
    ReviewId,
    AuthorId,
    Text,
    PubDate,
}
