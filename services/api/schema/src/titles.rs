use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub year: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "SetNull"
    )]
    Categories,
    #[sea_orm(has_many = "super::genre_titles::Entity")]
    GenreTitles,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::genre_titles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GenreTitles.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::genres::Entity> for Entity {
    fn to() -> RelationDef {
        super::genre_titles::Relation::Genres.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::genre_titles::Relation::Titles.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
