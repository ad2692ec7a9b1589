use serde::{Deserialize, Serialize};

use crate::error::{CsvError, Result};

/// Text format settings shared by the parser and the serializer.
///
/// Deserializable so the settings can come from whatever configuration
/// source the caller already uses; missing keys fall back to the defaults
/// (`,` and a header line).
///
/// ```
/// use csv_grid::format::{csv_parser::CsvParserBuilder, options::CsvOptions};
///
/// let options = CsvOptions {
///     delimiter: ';',
///     has_headers: true,
/// };
///
/// let document = CsvParserBuilder::from_options(&options)
///     .unwrap()
///     .from_str("a;b\n1;2")
///     .unwrap();
///
/// assert_eq!(document.num_columns(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    pub delimiter: char,
    pub has_headers: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_headers: true,
        }
    }
}

impl CsvOptions {
    /// The delimiter as a single byte. Only ASCII delimiters are supported.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(CsvError::InvalidArgument(format!(
                "delimiter {:?} is not an ASCII character",
                self.delimiter
            )))
        }
    }
}

pub(crate) fn check_delimiter(delimiter: u8) -> Result<char> {
    if delimiter.is_ascii() {
        Ok(char::from(delimiter))
    } else {
        Err(CsvError::InvalidArgument(format!(
            "delimiter byte {delimiter:#04x} is not an ASCII character"
        )))
    }
}
