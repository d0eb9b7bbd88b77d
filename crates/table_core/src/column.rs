use crate::sort::SortKey;

/// One sortable, filterable attribute of a row type. The extractor
/// returns `None` when the row has no usable value for this column;
/// such rows sort last and never match a non-empty filter.
pub struct Column<T> {
    pub key: &'static str,
    extract: fn(&T) -> Option<SortKey>,
}

impl<T> Column<T> {
    pub const fn new(key: &'static str, extract: fn(&T) -> Option<SortKey>) -> Self {
        Self { key, extract }
    }

    pub fn sort_key(&self, item: &T) -> Option<SortKey> {
        (self.extract)(item)
    }

    pub fn filter_text(&self, item: &T) -> Option<String> {
        self.sort_key(item).map(|key| key.filter_text())
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

/// Looks a column up by its key in a view's column table.
pub fn column_by_key<'a, T>(columns: &'a [Column<T>], key: &str) -> Option<&'a Column<T>> {
    columns.iter().find(|column| column.key == key)
}
