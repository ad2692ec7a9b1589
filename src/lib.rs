#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # CSV Grid

 An in-memory model of delimited text: headers over a rectangular grid of
 cells that grows on demand, a parser and a serializer for the text form,
 and a binder that maps rows to typed records and back.

 ## Core Concepts

- **CsvDocument:** headers plus a cell grid, addressed by `(row, column)`. Writing past the
  current extents grows the grid and fills every new cell with an empty value.
- **CsvParser:** splits lines on a single-byte delimiter into a document. The delimiter is a
  hard split character; there is no quoting.
- **CsvSerializer:** the inverse of the parser, one line per row.
- **RecordBinder:** stores records of a type implementing `Record` as rows and rebuilds them,
  with per-field column renames and an ignore list.

 ## Features

| **Feature** | **Description**                                              |
|-------------|--------------------------------------------------------------|
| async       | Enables tokio based `parse_path_async` and `to_path_async`  |
| full        | Enables all available features                               |

 ## Getting Started

```rust
use csv_grid::{
    binding::{Field, Record, RecordBinder},
    error::CsvError,
    format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder},
};

#[derive(Debug, Default, PartialEq)]
struct Car {
    year: u16,
    make: String,
}

impl Record for Car {
    fn fields() -> Vec<Field<Self>> {
        vec![
            Field::new("year", |c: &Car| c.year, |c: &mut Car, v| c.year = v),
            Field::new("make", |c: &Car| c.make.clone(), |c: &mut Car, v| c.make = v),
        ]
    }
}

fn main() -> Result<(), CsvError> {
    let csv = "year,make
1948,Porsche
1995,Peugeot";

    let document = CsvParserBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .from_str(csv)?;

    let mut binder = RecordBinder::<Car>::from_document(document)?;
    binder.add(&Car { year: 2021, make: "Mazda".to_string() })?;

    let cars = binder.get_all()?;
    assert_eq!(cars.len(), 3);
    assert_eq!(cars[0], Car { year: 1948, make: "Porsche".to_string() });

    let text = CsvSerializerBuilder::new()
        .build()
        .to_string(binder.document())?;
    assert_eq!(text, "year,make\n1948,Porsche\n1995,Peugeot\n2021,Mazda\n");

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.
 */

pub mod core;

/// Error types for document, text and binding operations
pub mod error;

#[doc(inline)]
pub use error::*;

pub mod format;

pub mod binding;
