use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{self, DomainError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "series")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        super::series_books::Relation::Book.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::series_books::Relation::Series.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rebuilds the domain record; the book id set comes from the
    /// `series_books` junction and is supplied by the caller.
    pub fn into_domain(self, books: BTreeSet<i32>) -> Result<domain::Series, DomainError> {
        domain::Series::restore(self.id, &self.title, books)
    }
}
