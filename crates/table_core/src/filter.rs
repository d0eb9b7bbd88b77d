use std::cmp::Ordering;

use crate::column::Column;

/// Produces the rows a list screen displays: the input sorted by
/// `comparator` (stable, so rows with equal keys keep their input order),
/// then narrowed to rows whose `attribute` text contains `query`
/// case-insensitively. An empty query keeps every row. The input slice is
/// never mutated.
pub fn apply_filter<T, C>(items: &[T], comparator: C, query: &str, attribute: Column<T>) -> Vec<T>
where
    T: Clone,
    C: Fn(&T, &T) -> Ordering,
{
    let mut rows: Vec<T> = items.to_vec();
    rows.sort_by(|a, b| comparator(a, b));
    if query.is_empty() {
        return rows;
    }
    let needle = query.to_lowercase();
    rows.retain(|item| {
        attribute
            .filter_text(item)
            .is_some_and(|text| text.to_lowercase().contains(&needle))
    });
    rows
}
