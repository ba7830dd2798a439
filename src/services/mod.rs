//! Management services: multi-entity invariants and cascading deletes.
//!
//! Every public mutation runs inside one transaction; queries read the
//! current state and compute derived views on the fly.

pub mod author_service;
pub mod book_service;
pub mod reading_service;
