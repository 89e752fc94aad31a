//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a row (or a referenced row) does not exist.
//! - [`InvalidField`] thrown when a value fails validation.
//! - [`InUse`] thrown when a delete would leave dependent rows behind.
//!
//! Messages are user facing and returned as-is by the HTTP layer.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`InUse`]: EngineError::InUse
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    KeyNotFound(String),
    #[error("{0}")]
    InvalidField(String),
    #[error("{0}")]
    InUse(String),
    #[error(transparent)]
    Database(DbErr),
}

impl From<DbErr> for EngineError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::InUse(format!(
                "Operação viola a integridade referencial: {detail}"
            )),
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::InUse(a), Self::InUse(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
