use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::column::Column;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// A column value lifted out of a row for comparison and filtering.
///
/// Numbers compare numerically across `Integer` and `Float`, timestamps
/// chronologically, and text in native byte order (uppercase before
/// lowercase). Values of different kinds fall back to a fixed rank,
/// numbers then timestamps then text, so the ordering is total.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<Utc>),
}

impl SortKey {
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.total_cmp(b),
            (SortKey::Integer(a), SortKey::Float(b)) => (*a as f64).total_cmp(b),
            (SortKey::Float(a), SortKey::Integer(b)) => a.total_cmp(&(*b as f64)),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::DateTime(a), SortKey::DateTime(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// The stringified form filter queries match against.
    pub fn filter_text(&self) -> String {
        match self {
            SortKey::Integer(v) => v.to_string(),
            SortKey::Float(v) => v.to_string(),
            SortKey::Text(v) => v.clone(),
            SortKey::DateTime(v) => v.to_rfc3339(),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            SortKey::Integer(_) | SortKey::Float(_) => 0,
            SortKey::DateTime(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

/// Builds the row comparator for one sort column. Rows where the column
/// yields no value order after all rows where it does; descending is the
/// exact reverse of ascending.
pub fn comparator<T>(order: SortOrder, column: Column<T>) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| {
        let ordering = match (column.sort_key(a), column.sort_key(b)) {
            (Some(ka), Some(kb)) => ka.compare(&kb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn text_keys_use_byte_order() {
        let a = SortKey::Text("Alpha".into());
        let b = SortKey::Text("beta".into());
        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(b.compare(&a), Ordering::Greater);
    }

    #[test]
    fn numeric_keys_unify_integer_and_float() {
        let a = SortKey::Integer(3);
        let b = SortKey::Float(2.5);
        assert_eq!(a.compare(&b), Ordering::Greater);
        assert_eq!(b.compare(&a), Ordering::Less);
        assert_eq!(SortKey::Integer(2).compare(&SortKey::Float(2.0)), Ordering::Equal);
    }

    #[test]
    fn mixed_kinds_order_by_rank() {
        let number = SortKey::Integer(9);
        let when = SortKey::DateTime(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let text = SortKey::Text("a".into());
        assert_eq!(number.compare(&when), Ordering::Less);
        assert_eq!(when.compare(&text), Ordering::Less);
        assert_eq!(text.compare(&number), Ordering::Greater);
    }

    #[test]
    fn integer_filter_text_is_decimal() {
        assert_eq!(SortKey::Integer(42).filter_text(), "42");
        assert_eq!(SortKey::Float(250000.0).filter_text(), "250000");
    }
}
