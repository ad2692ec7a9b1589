use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::{
    binding::field::{Field, Record},
    core::{document::CsvDocument, header::HeaderTable},
    error::{CsvError, Result},
};

/// Maps the rows of a [`CsvDocument`] to and from records of type `T`.
///
/// Only primitive fields take part. Fields are ordered by name, and each one
/// is bound to the column whose header carries the field's title: its
/// natural name, or the title registered with [`set_header_map`]. Ignored
/// fields have no column and are left at their default when records are
/// read back.
///
/// [`set_header_map`]: RecordBinder::set_header_map
///
/// # Examples
///
/// ```
/// use csv_grid::binding::{Field, Record, RecordBinder};
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct Person {
///     name: String,
///     age: i32,
/// }
///
/// impl Record for Person {
///     fn fields() -> Vec<Field<Self>> {
///         vec![
///             Field::new("Name", |p: &Person| p.name.clone(), |p: &mut Person, v| p.name = v),
///             Field::new("Age", |p: &Person| p.age, |p: &mut Person, v| p.age = v),
///         ]
///     }
/// }
///
/// let mut binder = RecordBinder::<Person>::new();
/// binder.add(&Person { name: "Bo".to_string(), age: 9 }).unwrap();
///
/// let titles: Vec<&str> = binder.document().headers().titles().collect();
/// assert_eq!(titles, vec!["Age", "Name"]);
/// assert_eq!(binder.get(0).unwrap(), Person { name: "Bo".to_string(), age: 9 });
/// ```
pub struct RecordBinder<T: Record> {
    document: CsvDocument,
    fields: Vec<Field<T>>,
    header_map: BTreeMap<&'static str, String>,
    ignores: BTreeSet<&'static str>,
}

impl<T: Record> Default for RecordBinder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> RecordBinder<T> {
    /// Creates an empty document whose headers are the record's field names.
    pub fn new() -> Self {
        let mut binder = Self::unbound(CsvDocument::new());
        binder.document = CsvDocument::with_headers(binder.active_headers());
        binder
    }

    /// Creates an empty document with a rename map and an ignore list
    /// applied from the start. Every named field is validated first.
    pub fn with_options<M, F, S, I, G>(header_map: M, ignores: I) -> Result<Self>
    where
        M: IntoIterator<Item = (F, S)>,
        F: AsRef<str>,
        S: Into<String>,
        I: IntoIterator<Item = G>,
        G: AsRef<str>,
    {
        let mut binder = Self::unbound(CsvDocument::new());

        for (field, title) in header_map {
            let title = checked_title(title.into())?;
            let name = binder.field(field.as_ref())?.name();
            binder.header_map.insert(name, title);
        }

        for field in ignores {
            let name = binder.field(field.as_ref())?.name();
            binder.ignores.insert(name);
        }

        binder.document = CsvDocument::with_headers(binder.active_headers());
        Ok(binder)
    }

    /// Binds an existing document, typically one produced by the parser.
    ///
    /// Columns are matched to fields by header title. A document without
    /// headers gets one header per field, assigned positionally in field
    /// order. Fields with no matching column get an empty one appended.
    pub fn from_document(document: CsvDocument) -> Result<Self> {
        Self::unbound(CsvDocument::new()).with_document(document)
    }

    /// Replaces the bound document, keeping the renames and ignores already
    /// registered. Matching follows the same rules as [`from_document`].
    ///
    /// [`from_document`]: RecordBinder::from_document
    pub fn with_document(mut self, document: CsvDocument) -> Result<Self> {
        self.document = document;

        if self.document.headers().is_empty() {
            let headers = self.active_headers();
            self.document.set_headers(headers)?;
            return Ok(self);
        }

        let missing: Vec<String> = self
            .active_fields()
            .map(|field| self.title_of(field.name()).to_string())
            .filter(|title| self.document.headers().find(title).is_none())
            .collect();

        for title in missing {
            self.document.append_column(title)?;
        }

        debug!(
            "Bound {} rows of {}",
            self.document.num_rows(),
            std::any::type_name::<T>()
        );
        Ok(self)
    }

    fn unbound(document: CsvDocument) -> Self {
        let mut fields = T::fields();
        fields.sort_by(|a, b| a.name().cmp(b.name()));

        Self {
            document,
            fields,
            header_map: BTreeMap::new(),
            ignores: BTreeSet::new(),
        }
    }

    /// One header per active field, titled by its rename or its name.
    fn active_headers(&self) -> HeaderTable {
        HeaderTable::from_titles(
            self.active_fields()
                .map(|field| self.title_of(field.name()).to_string()),
        )
    }

    /// The bound document, for serializing or rendering.
    pub fn document(&self) -> &CsvDocument {
        &self.document
    }

    /// Gives up the binding and returns the document.
    pub fn into_document(self) -> CsvDocument {
        self.document
    }

    /// Number of stored records.
    pub fn num_rows(&self) -> usize {
        self.document.num_rows()
    }

    /// Registered renames, keyed by field name.
    pub fn header_map(&self) -> &BTreeMap<&'static str, String> {
        &self.header_map
    }

    /// Fields currently left out of the document.
    pub fn ignores(&self) -> &BTreeSet<&'static str> {
        &self.ignores
    }

    /// Stores `record` as a new row at the end of the document.
    pub fn add(&mut self, record: &T) -> Result<()> {
        let row = self.document.num_rows();

        for index in 0..self.fields.len() {
            let field = &self.fields[index];
            if !self.is_active(field) {
                continue;
            }

            let value = field.read(record);
            let column = self.column_or_create(index)?;
            self.document.set(row, column, value)?;
        }

        Ok(())
    }

    /// Adds every record in order. `None` entries are skipped.
    pub fn add_range<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<Option<T>>,
    {
        for record in records {
            if let Some(record) = record.into() {
                self.add(&record)?;
            }
        }

        Ok(())
    }

    /// Builds the record stored at `row`.
    pub fn get(&self, row: usize) -> Result<T> {
        let len = self.document.num_rows();
        if row >= len {
            return Err(CsvError::out_of_range("record", row, len));
        }

        let mut record = T::default();
        for field in self.active_fields() {
            let Some(column) = self.column_of(field.name()) else {
                continue;
            };

            let value = self.document.get(row, column)?;
            field.write(&mut record, value)?;
        }

        Ok(record)
    }

    /// Builds every stored record, in row order.
    pub fn get_all(&self) -> Result<Vec<T>> {
        (0..self.document.num_rows()).map(|row| self.get(row)).collect()
    }

    /// Deletes the record at `row`. Later records shift up by one.
    pub fn remove(&mut self, row: usize) -> Result<()> {
        let len = self.document.num_rows();
        if row >= len {
            return Err(CsvError::out_of_range("record", row, len));
        }

        self.document.remove_row(row)
    }

    /// Binds `field` to a column titled `title`, renaming its current column
    /// if it has one.
    pub fn set_header_map(&mut self, field: &str, title: &str) -> Result<()> {
        let title = checked_title(title.to_string())?;
        let name = self.field(field)?.name();

        let current = self.column_of(name);
        self.header_map.insert(name, title.clone());

        if self.ignores.contains(name) {
            return Ok(());
        }

        if let Some(index) = current {
            self.document.rename_header(index, title.clone());
        }

        debug!("Field {name} mapped to column {title}");
        Ok(())
    }

    /// Drops the rename registered for `field`; its column takes back the
    /// field's own name.
    pub fn remove_header_map(&mut self, field: &str) -> Result<()> {
        let name = self.field(field)?.name();

        let current = self.column_of(name);
        if self.header_map.remove(name).is_none() {
            return Ok(());
        }

        if let (Some(index), false) = (current, self.ignores.contains(name)) {
            self.document.rename_header(index, name.to_string());
        }

        debug!("Field {name} mapped back to its own column");
        Ok(())
    }

    /// Stops mapping `field`. Its column is removed and later columns shift
    /// left by one.
    pub fn ignore(&mut self, field: &str) -> Result<()> {
        let name = self.field(field)?.name();
        if self.ignores.contains(name) {
            return Ok(());
        }

        if let Some(index) = self.column_of(name) {
            self.document.remove_column(index)?;
        }
        self.ignores.insert(name);

        debug!("Field {name} ignored");
        Ok(())
    }

    /// Resumes mapping an ignored `field`, appending its column at the end.
    pub fn acknowledge(&mut self, field: &str) -> Result<()> {
        let name = self.field(field)?.name();
        if !self.ignores.contains(name) {
            return Ok(());
        }

        let title = self.title_of(name).to_string();
        if self.document.headers().find(&title).is_none() {
            self.document.append_column(title)?;
        }
        self.ignores.remove(name);

        debug!("Field {name} acknowledged");
        Ok(())
    }

    /// Resolves a field name to its primitive descriptor.
    fn field(&self, name: &str) -> Result<&Field<T>> {
        if name.trim().is_empty() {
            return Err(CsvError::MissingArgument("field"));
        }

        let field = self
            .fields
            .iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| CsvError::UnknownField {
                field: name.to_string(),
                record: std::any::type_name::<T>(),
            })?;

        if !field.is_primitive() {
            return Err(CsvError::NonPrimitiveField(name.to_string()));
        }

        Ok(field)
    }

    fn is_active(&self, field: &Field<T>) -> bool {
        field.is_primitive() && !self.ignores.contains(field.name())
    }

    fn active_fields(&self) -> impl Iterator<Item = &Field<T>> {
        self.fields.iter().filter(|field| self.is_active(field))
    }

    fn title_of<'a>(&'a self, name: &'a str) -> &'a str {
        self.header_map.get(name).map_or(name, String::as_str)
    }

    fn column_of(&self, name: &str) -> Option<usize> {
        self.document
            .headers()
            .find(self.title_of(name))
            .map(|header| header.index())
    }

    fn column_or_create(&mut self, index: usize) -> Result<usize> {
        let name = self.fields[index].name();
        match self.column_of(name) {
            Some(column) => Ok(column),
            None => {
                let title = self.title_of(name).to_string();
                self.document.append_column(title)
            }
        }
    }
}

fn checked_title(title: String) -> Result<String> {
    if title.trim().is_empty() {
        Err(CsvError::MissingArgument("title"))
    } else {
        Ok(title)
    }
}
