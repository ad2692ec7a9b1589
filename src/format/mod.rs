//! Delimited text support for [`CsvDocument`](crate::core::document::CsvDocument).
//!
//! This module turns text into documents and documents back into text, with
//! a configurable single-byte delimiter and an optional header line.
//!
//! # Module Architecture
//!
//! 1. **CsvParser**: splits lines on the delimiter and materializes the grid.
//!    Input can be pre-split lines, a string, any `Read` source or a file.
//!
//! 2. **CsvSerializer**: joins each row's values with the delimiter, one line
//!    per row, optionally preceded by the header line.
//!
//! 3. **render**: a plain-text table view for display.
//!
//! Parser and serializer are configured through builders, or from a
//! deserialized [`CsvOptions`](options::CsvOptions).
//!
//! # Limitations
//!
//! There is no quoting. A field containing the delimiter or a line break is
//! split on the way back in.
//!
//! # Examples
//!
//! ```
//! use csv_grid::format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder};
//!
//! let document = CsvParserBuilder::new()
//!     .has_headers(true)
//!     .from_str("year,make\n1948,Porsche\n1995,Peugeot")
//!     .unwrap();
//!
//! let lines = CsvSerializerBuilder::new()
//!     .delimiter(b';')
//!     .build()
//!     .to_lines(&document)
//!     .unwrap();
//!
//! assert_eq!(lines, vec!["year;make", "1948;Porsche", "1995;Peugeot"]);
//! ```

pub mod options;

/// A module providing facilities for reading CSV text into documents.
pub mod csv_parser;

/// A module providing facilities for writing documents as CSV text.
pub mod csv_serializer;

pub mod render;
