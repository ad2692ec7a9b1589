use serde::{Deserialize, Serialize};

/// A named column descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    index: usize,
    title: String,
}

impl Header {
    /// A header titled `title` at position `index`.
    pub fn new<S: Into<String>>(index: usize, title: S) -> Self {
        Self {
            index,
            title: title.into(),
        }
    }

    /// Position of the header, kept equal to its column.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Ordered list of headers. Indices always match positions: removing a
/// header renumbers every header after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTable {
    headers: Vec<Header>,
}

impl HeaderTable {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers `titles` from zero in order.
    ///
    /// ```
    /// use csv_grid::core::header::HeaderTable;
    ///
    /// let table = HeaderTable::from_titles(["id", "name", "id"]);
    ///
    /// assert_eq!(table.len(), 3);
    /// assert_eq!(table.find("id").map(|h| h.index()), Some(0));
    /// assert_eq!(table.get(1).map(|h| h.title()), Some("name"));
    /// ```
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| Header::new(index, title))
            .collect();

        Self { headers }
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// The header at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<&Header> {
        self.headers.get(index)
    }

    /// First header carrying `title`.
    pub fn find(&self, title: &str) -> Option<&Header> {
        self.headers.iter().find(|header| header.title == title)
    }

    /// Headers in column order.
    pub fn iter(&self) -> std::slice::Iter<'_, Header> {
        self.headers.iter()
    }

    /// Titles in column order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(Header::title)
    }

    pub(crate) fn push(&mut self, title: String) -> &Header {
        let index = self.headers.len();
        self.headers.push(Header::new(index, title));
        &self.headers[index]
    }

    pub(crate) fn rename(&mut self, index: usize, title: String) {
        if let Some(header) = self.headers.get_mut(index) {
            header.title = title;
        }
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Header> {
        if index >= self.headers.len() {
            return None;
        }

        let removed = self.headers.remove(index);
        for header in &mut self.headers[index..] {
            header.index -= 1;
        }

        Some(removed)
    }
}

impl<'a> IntoIterator for &'a HeaderTable {
    type Item = &'a Header;
    type IntoIter = std::slice::Iter<'a, Header>;

    fn into_iter(self) -> Self::IntoIter {
        self.headers.iter()
    }
}
