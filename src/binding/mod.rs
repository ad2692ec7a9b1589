//! Typed record binding over a [`CsvDocument`](crate::core::document::CsvDocument).
//!
//! A record type describes its fields once through [`Record::fields`]: a
//! name, a getter and a setter per primitive field, and
//! [`Field::opaque`] for fields that must never become columns. A
//! [`RecordBinder`] then stores records as rows and rebuilds them from rows,
//! converting parsed text to each field's type on the way out.

pub mod field;

pub mod binder;

#[doc(inline)]
pub use binder::RecordBinder;

#[doc(inline)]
pub use field::{Field, FieldKind, Primitive, Record};
