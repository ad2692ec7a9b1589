use std::{io, path::PathBuf};

use thiserror::Error;

use crate::binding::FieldKind;

#[derive(Error, Debug)]
/// Errors raised by documents, parsers, serializers and record binders.
///
/// Every operation validates its arguments before touching the grid, so an
/// error always leaves the document exactly as it was.
pub enum CsvError {
    /// A required string argument (file name, title, field name) was blank.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    /// An argument was present but unusable, e.g. an unreadable source.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A row, column or record index was outside the current extents.
    #[error("{name} index {index} is out of range (length {len})")]
    IndexOutOfRange {
        name: &'static str,
        index: usize,
        len: usize,
    },

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// A stored value could not be coerced to the declared field type.
    #[error("cannot convert {value:?} to {kind}")]
    Format { value: String, kind: FieldKind },

    #[error("field {field} does not belong to {record}")]
    UnknownField { field: String, record: &'static str },

    #[error("field {0} must be a primitive or string type")]
    NonPrimitiveField(String),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CsvError>;

impl CsvError {
    pub(crate) fn out_of_range(name: &'static str, index: usize, len: usize) -> Self {
        CsvError::IndexOutOfRange { name, index, len }
    }
}
