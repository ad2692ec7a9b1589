use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;

use crate::{
    core::document::CsvDocument,
    error::{CsvError, Result},
    format::options::{check_delimiter, CsvOptions},
};

/// Turns a [`CsvDocument`] back into delimited text.
///
/// Each row becomes one line of cell values joined by the delimiter and
/// terminated by `\n`. Values are written verbatim: a value containing the
/// delimiter or a line break will not survive a round trip.
///
/// # Examples
///
/// ```
/// use csv_grid::format::{csv_parser::CsvParserBuilder, csv_serializer::CsvSerializerBuilder};
///
/// let document = CsvParserBuilder::new().from_str("city,pop\nBoston,4628910").unwrap();
///
/// let text = CsvSerializerBuilder::for_document(&document)
///     .build()
///     .to_string(&document)
///     .unwrap();
///
/// assert_eq!(text, "city,pop\nBoston,4628910\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CsvSerializer {
    delimiter: u8,
    has_headers: bool,
}

impl CsvSerializer {
    /// Renders the document as lines without terminators.
    pub fn to_lines(&self, document: &CsvDocument) -> Result<Vec<String>> {
        let separator = check_delimiter(self.delimiter)?.to_string();
        let mut lines = Vec::with_capacity(document.num_rows() + 1);

        if self.has_headers {
            lines.push(document.headers().titles().collect::<Vec<_>>().join(&separator));
        }

        for row in document.rows() {
            let values: Vec<String> = row.values().iter().map(ToString::to_string).collect();
            lines.push(values.join(&separator));
        }

        Ok(lines)
    }

    /// Renders the document as one string, every line ending with `\n`.
    pub fn to_string(&self, document: &CsvDocument) -> Result<String> {
        let mut text = String::new();
        for line in self.to_lines(document)? {
            text.push_str(&line);
            text.push('\n');
        }

        Ok(text)
    }

    /// Writes every line to `wtr` and flushes it.
    pub fn to_writer<W: Write>(&self, document: &CsvDocument, wtr: W) -> Result<()> {
        let lines = self.to_lines(document)?;
        let mut wtr = BufWriter::new(wtr);

        for line in &lines {
            wtr.write_all(line.as_bytes())?;
            wtr.write_all(b"\n")?;
        }
        wtr.flush()?;

        debug!("Wrote {} csv lines", lines.len());
        Ok(())
    }

    /// Writes the document to `path`, replacing any existing file.
    ///
    /// The text is fully rendered before the file is opened.
    pub fn to_path<P: AsRef<Path>>(&self, document: &CsvDocument, path: P) -> Result<()> {
        let path = checked_target(path.as_ref())?;
        let text = self.to_string(document)?;

        fs::write(&path, text)?;

        debug!("Wrote csv file {}", path.display());
        Ok(())
    }

    /// Writes the document to `path` on the tokio runtime in a single write.
    #[cfg(feature = "async")]
    pub async fn to_path_async<P: AsRef<Path>>(&self, document: &CsvDocument, path: P) -> Result<()> {
        let path = checked_target(path.as_ref())?;
        let text = self.to_string(document)?;

        tokio::fs::write(&path, text).await?;

        debug!("Wrote csv file {} asynchronously", path.display());
        Ok(())
    }
}

fn checked_target(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(CsvError::MissingArgument("path"));
    }

    match path.parent() {
        Some(directory) if !directory.as_os_str().is_empty() && !directory.is_dir() => {
            Err(CsvError::DirectoryNotFound(directory.to_path_buf()))
        }
        _ => Ok(path.to_path_buf()),
    }
}

/// A builder for configuring CSV serialization.
///
/// Defaults to a comma delimiter and a header line.
#[derive(Debug, Clone, Copy)]
pub struct CsvSerializerBuilder {
    delimiter: u8,
    has_headers: bool,
}

impl Default for CsvSerializerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvSerializerBuilder {
    /// A builder with a comma delimiter and a header line.
    pub fn new() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
        }
    }

    /// Starts from the delimiter and header flag the document was parsed with.
    pub fn for_document(document: &CsvDocument) -> Self {
        Self {
            delimiter: document.delimiter(),
            has_headers: document.has_headers(),
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
    /// use csv_grid::{core::document::CsvDocument, format::csv_serializer::CsvSerializerBuilder};
    ///
    /// let mut document = CsvDocument::new();
    /// document.append_header("a").unwrap();
    /// document.append_header("b").unwrap();
    /// document.set(0, 1, 2_i32).unwrap();
    ///
    /// let text = CsvSerializerBuilder::new()
    ///     .delimiter(b'|')
    ///     .build()
    ///     .to_string(&document)
    ///     .unwrap();
    ///
    /// assert_eq!(text, "a|b\n|2\n");
    /// ```
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Whether the header titles are written as the first line.
    pub fn has_headers(mut self, yes: bool) -> Self {
        self.has_headers = yes;
        self
    }

    /// Creates the serializer.
    pub fn build(self) -> CsvSerializer {
        CsvSerializer {
            delimiter: self.delimiter,
            has_headers: self.has_headers,
        }
    }
}
