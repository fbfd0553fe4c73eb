use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(slug_table(
                Categories::Table,
                Categories::Id,
                Categories::Name,
                Categories::Slug,
            ))
            .await?;
        manager
            .create_table(slug_table(Genres::Table, Genres::Id, Genres::Name, Genres::Slug))
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Titles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Titles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Titles::Name).string_len(256).not_null())
                    .col(ColumnDef::new(Titles::Year).integer().not_null())
                    .col(ColumnDef::new(Titles::Description).text())
                    .col(ColumnDef::new(Titles::CategoryId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_titles_category_id")
                            .from(Titles::Table, Titles::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Titles::Table)
                    .col(Titles::Year)
                    .name("idx_titles_year")
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GenreTitles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GenreTitles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(GenreTitles::TitleId).integer().not_null())
                    .col(ColumnDef::new(GenreTitles::GenreId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_titles_title_id")
                            .from(GenreTitles::Table, GenreTitles::TitleId)
                            .to(Titles::Table, Titles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_genre_titles_genre_id")
                            .from(GenreTitles::Table, GenreTitles::GenreId)
                            .to(Genres::Table, Genres::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(GenreTitles::Table)
                    .col(GenreTitles::TitleId)
                    .col(GenreTitles::GenreId)
                    .name("uq_genre_titles_title_genre")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GenreTitles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Titles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genres::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}

/// Categories and genres share the same name + unique slug layout.
fn slug_table<T>(table: T, id: T, name: T, slug: T) -> TableCreateStatement
where
    T: IntoIden + 'static,
{
    Table::create()
        .table(table)
        .if_not_exists()
        .col(
            ColumnDef::new(id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(name).string_len(256).not_null())
        .col(ColumnDef::new(slug).string_len(50).not_null().unique_key())
        .to_owned()
}

#[derive(Iden)]
pub(crate) enum Categories {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden)]
pub(crate) enum Genres {
    Table,
    Id,
    Name,
    Slug,
}

#[derive(Iden)]
pub(crate) enum Titles {
    Table,
    Id,
    Name,
    Year,
    Description,
    CategoryId,
}

#[derive(Iden)]
enum GenreTitles {
    Table,
    Id,
    TitleId,
    GenreId,
}
