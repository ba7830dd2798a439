use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{self, CountryCode, DomainError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub nationality: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_authors::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_authors::Relation::Author.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for domain::Author {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        domain::Author::restore(
            model.id,
            &model.first_name,
            &model.last_name,
            super::parse_stored_date_opt("birth_date", model.birth_date.as_deref())?,
            super::parse_stored_date_opt("death_date", model.death_date.as_deref())?,
            CountryCode::parse(&model.nationality)?,
        )
    }
}
