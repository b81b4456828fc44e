// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Note has neither title nor content")]
    EmptyNote,
    #[error("Duplicate note id: {0}")]
    DuplicateId(i64),
    #[error("Malformed note record: {0}")]
    MalformedRecord(String),
}
