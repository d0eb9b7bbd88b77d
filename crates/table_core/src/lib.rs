//! In-memory list state for admin tables: sorting, filtering, row
//! selection, and pagination, independent of any rendering layer.

pub mod column;
pub mod filter;
pub mod pagination;
pub mod selection;
pub mod sort;
pub mod state;

pub use column::Column;
pub use filter::apply_filter;
pub use pagination::{Pagination, ROWS_PER_PAGE_OPTIONS};
pub use selection::Selection;
pub use sort::{comparator, SortKey, SortOrder};
pub use state::{FilterState, TableState};
