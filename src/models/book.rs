use std::collections::BTreeSet;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::{self, DomainError, Language};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub published: String,
    pub isbn: String,
    pub pages: i32,
    pub language: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reading::Entity")]
    Reading,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_authors::Relation::Author.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_authors::Relation::Book.def().rev())
    }
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        super::series_books::Relation::Series.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::series_books::Relation::Book.def().rev())
    }
}

impl Related<super::reading::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reading.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Rebuilds the domain record; the author id set comes from the
    /// `book_authors` junction and is supplied by the caller.
    pub fn into_domain(self, authors: BTreeSet<i32>) -> Result<domain::Book, DomainError> {
        domain::Book::restore(
            self.id,
            &self.title,
            authors,
            super::parse_stored_date("published", &self.published)?,
            &self.isbn,
            self.pages,
            Language::parse(&self.language)?,
        )
    }
}
