use std::{
    fmt,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Terminator};
use log::{debug, warn};

use crate::{
    core::{document::CsvDocument, header::HeaderTable, value::CellValue},
    error::{CsvError, Result},
    format::options::{check_delimiter, CsvOptions},
};

/// Turns delimited text into a [`CsvDocument`].
///
/// The delimiter is a hard split character: there is no quoting or escaping,
/// so a quote character is kept as part of the field it appears in. Every
/// parsed cell holds [`CellValue::Text`]; typed interpretation is left to the
/// record binder.
///
/// # Column count
///
/// The number of columns is taken from the first data line (the line after
/// the header line when headers are enabled). Longer lines are truncated to
/// that width, shorter lines leave their trailing cells empty.
///
/// # Examples
///
/// ```
/// use csv_grid::format::csv_parser::CsvParserBuilder;
///
/// let document = CsvParserBuilder::new()
///     .has_headers(true)
///     .delimiter(b',')
///     .from_str("A,B,C\n1,2,3\n4,5,6")
///     .unwrap();
///
/// let titles: Vec<&str> = document.headers().titles().collect();
/// assert_eq!(titles, vec!["A", "B", "C"]);
/// assert_eq!(document.num_rows(), 2);
/// assert_eq!(document.get(0, 1).unwrap().to_string(), "2");
/// assert_eq!(document.get(1, 2).unwrap().to_string(), "6");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
    has_headers: bool,
}

impl CsvParser {
    /// Parses lines that are already split on their terminators. Empty lines
    /// are skipped.
    pub fn parse_lines<I, S>(&self, lines: I) -> Result<CsvDocument>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let separator = check_delimiter(self.delimiter)?;

        let records = lines
            .into_iter()
            .filter(|line| !line.as_ref().is_empty())
            .map(|line| line.as_ref().split(separator).map(str::to_string).collect());

        self.build(records)
    }

    /// Parses a whole text, splitting lines on `\r`, `\n` or `\r\n`.
    pub fn parse_str(&self, text: &str) -> Result<CsvDocument> {
        self.parse_lines(text.split(['\r', '\n']))
    }

    /// Parses everything `rdr` yields.
    ///
    /// The source is read to its end before the document is built, so a read
    /// failure never produces a partial document.
    pub fn parse_reader<R: Read>(&self, rdr: R) -> Result<CsvDocument> {
        check_delimiter(self.delimiter)?;

        let reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .terminator(Terminator::CRLF)
            .has_headers(false) // the header line is handled by `build`
            .quoting(false)
            .flexible(true)
            .from_reader(rdr);

        let records = reader
            .into_records()
            .map(|result| match result {
                Ok(record) => Ok(record.iter().map(str::to_string).collect::<Vec<String>>()),
                Err(error) => Err(unreadable(error)),
            })
            .collect::<Result<Vec<_>>>()?;

        self.build(records)
    }

    /// Parses the file at `path` and records it as the document's filename.
    pub fn parse_path<P: AsRef<Path>>(&self, path: P) -> Result<CsvDocument> {
        let path = checked_source(path.as_ref())?;

        debug!("Reading csv file {}", path.display());
        let file = File::open(&path).map_err(unreadable)?;

        let mut document = self.parse_reader(file)?;
        document.set_filename(path);

        Ok(document)
    }

    /// Reads the file at `path` on the tokio runtime, then parses it.
    #[cfg(feature = "async")]
    pub async fn parse_path_async<P: AsRef<Path>>(&self, path: P) -> Result<CsvDocument> {
        let path = checked_source(path.as_ref())?;

        debug!("Reading csv file {} asynchronously", path.display());
        let text = tokio::fs::read_to_string(&path)
            .await
            .map_err(unreadable)?;

        let mut document = self.parse_str(&text)?;
        document.set_filename(path);

        Ok(document)
    }

    fn build<I>(&self, records: I) -> Result<CsvDocument>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut document = CsvDocument::with_format(self.delimiter, self.has_headers);
        let mut records = records.into_iter();

        if self.has_headers {
            if let Some(titles) = records.next() {
                document.set_headers(HeaderTable::from_titles(titles))?;
            }
        }

        let mut num_columns = None;
        for fields in records {
            let width = *num_columns.get_or_insert(fields.len());
            let row = document.num_rows();

            if fields.len() > width {
                warn!(
                    "Row {row} has {} fields, keeping the first {width}",
                    fields.len()
                );
            }

            for (column, field) in fields.into_iter().take(width).enumerate() {
                document.set(row, column, CellValue::Text(field))?;
            }
        }

        debug!(
            "Parsed {} rows and {} columns",
            document.num_rows(),
            document.num_columns()
        );

        Ok(document)
    }
}

fn unreadable<E: fmt::Display>(error: E) -> CsvError {
    CsvError::InvalidArgument(format!("Cannot read source: {error}"))
}

fn checked_source(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(CsvError::MissingArgument("filename"));
    }

    if !path.is_file() {
        return Err(CsvError::FileNotFound(path.to_path_buf()));
    }

    Ok(path.to_path_buf())
}

/// A builder for configuring CSV parsing.
///
/// # Default Configuration
///
/// - Delimiter: comma (,)
/// - Headers: enabled
///
/// # Examples
///
/// ```
/// use csv_grid::format::csv_parser::CsvParserBuilder;
///
/// let document = CsvParserBuilder::new()
///     .delimiter(b';')
///     .has_headers(false)
///     .from_str("1;2\n3;4")
///     .unwrap();
///
/// assert!(document.headers().is_empty());
/// assert_eq!(document.num_rows(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CsvParserBuilder {
    delimiter: u8,
    has_headers: bool,
}

impl Default for CsvParserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvParserBuilder {
    /// A builder with a comma delimiter and a header line.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }

    /// Starts from loaded [`CsvOptions`]. Fails if the delimiter is not ASCII.
    pub fn from_options(options: &CsvOptions) -> Result<Self> {
        Ok(Self {
            delimiter: options.delimiter_byte()?,
            has_headers: options.has_headers,
        })
    }

    /// Sets the field delimiter.
    ///
    /// ```
    /// use csv_grid::format::csv_parser::CsvParserBuilder;
    ///
    /// // Use tab as delimiter
    /// let builder = CsvParserBuilder::new().delimiter(b'\t');
    /// ```
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// When enabled, the first line supplies the header titles and is not
    /// stored as a row.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Creates the parser, for callers that parse several sources with the same settings.
    pub fn build(self) -> CsvParser {
        CsvParser {
            delimiter: self.delimiter,
            has_headers: self.has_headers,
        }
    }

    /// Builds the parser and runs [`CsvParser::parse_lines`].
    pub fn from_lines<I, S>(self, lines: I) -> Result<CsvDocument>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build().parse_lines(lines)
    }

    /// Builds the parser and runs [`CsvParser::parse_str`].
    pub fn from_str(self, text: &str) -> Result<CsvDocument> {
        self.build().parse_str(text)
    }

    /// Builds the parser and runs [`CsvParser::parse_reader`].
    ///
    /// ```
    /// use std::io::Cursor;
    ///
    /// use csv_grid::format::csv_parser::CsvParserBuilder;
    ///
    /// let document = CsvParserBuilder::new()
    ///     .from_reader(Cursor::new("id,qty\r\nA-1,4\r\n"))
    ///     .unwrap();
    ///
    /// assert_eq!(document.get(0, 1).unwrap().to_string(), "4");
    /// ```
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<CsvDocument> {
        self.build().parse_reader(rdr)
    }

    /// Builds the parser and runs [`CsvParser::parse_path`].
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<CsvDocument> {
        self.build().parse_path(path)
    }

    #[cfg(feature = "async")]
    /// Builds the parser and runs [`CsvParser::parse_path_async`].
    pub async fn from_path_async<P: AsRef<Path>>(self, path: P) -> Result<CsvDocument> {
        self.build().parse_path_async(path).await
    }
}
