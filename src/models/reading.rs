use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{self, DomainError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "readings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub book_id: i32,
    pub beginning: String,
    pub end_date: Option<String>,
    pub pages_per_hour: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for domain::Reading {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        domain::Reading::restore(
            model.id,
            model.book_id,
            super::parse_stored_date("beginning", &model.beginning)?,
            super::parse_stored_date_opt("end_date", model.end_date.as_deref())?,
            model.pages_per_hour,
        )
    }
}
