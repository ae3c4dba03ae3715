//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidFlow`] thrown when a flow lacks a name or has a zero amount.
//! - [`KeyNotFound`] thrown when an item is not found.
//! - [`EmptyTag`] thrown when a tag is empty. Flow operations skip such tags
//!   instead of failing.
//!
//!  [`InvalidFlow`]: EngineError::InvalidFlow
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`EmptyTag`]: EngineError::EmptyTag
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid flow: {0}")]
    InvalidFlow(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Empty tag given")]
    EmptyTag,
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidFlow(a), Self::InvalidFlow(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::EmptyTag, Self::EmptyTag) => true,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
