//! Tabular document model: cell values, headers, the cell grid and the
//! document that composes them.

pub mod value;

pub mod header;

pub mod grid;

pub mod document;
