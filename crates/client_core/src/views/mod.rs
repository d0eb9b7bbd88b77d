//! Headless admin screens: each owns its fetched collection and table
//! state and exposes the operations a rendering shell wires to inputs.

mod movies;
mod order_details;
mod orders;
mod showtime_edit;

pub use movies::{MovieListView, MOVIE_COLUMNS, MOVIE_FILTER_ATTRIBUTES};
pub use order_details::OrderDetailsView;
pub use orders::{BulkDeleteOutcome, OrderListView, ORDER_COLUMNS};
pub use showtime_edit::{ShowtimeEditView, ShowtimeForm};
