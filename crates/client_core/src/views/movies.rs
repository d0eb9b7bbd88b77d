use shared::domain::FilmId;
use shared::protocol::FilmSummary;
use table_core::column::column_by_key;
use table_core::{apply_filter, comparator, Column, FilterState, SortKey, TableState};

use crate::error::ClientError;
use crate::resource::{Resource, ResourceSlot};
use crate::AdminClient;

fn film_id_key(film: &FilmSummary) -> Option<SortKey> {
    Some(SortKey::Integer(film.film_id.0))
}

fn film_name_key(film: &FilmSummary) -> Option<SortKey> {
    Some(SortKey::Text(film.film_name.clone()))
}

fn film_describe_key(film: &FilmSummary) -> Option<SortKey> {
    Some(SortKey::Text(film.film_describe.clone()))
}

pub const MOVIE_COLUMNS: [Column<FilmSummary>; 3] = [
    Column::new("film_id", film_id_key),
    Column::new("film_name", film_name_key),
    Column::new("film_describe", film_describe_key),
];

/// The toolbar offers exactly these attributes for text filtering.
pub const MOVIE_FILTER_ATTRIBUTES: [&str; 2] = ["film_name", "film_describe"];

const DEFAULT_SORT: &str = "film_name";

/// The movie catalogue screen. Rows can be selected, but the admin
/// boundary exposes no film deletion, so selection is display state
/// only.
pub struct MovieListView {
    resource: ResourceSlot<Vec<FilmSummary>>,
    pub table: TableState<FilmId>,
    pub filter: FilterState,
}

impl Default for MovieListView {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieListView {
    pub fn new() -> Self {
        Self {
            resource: ResourceSlot::new(),
            table: TableState::new(DEFAULT_SORT),
            filter: FilterState::new(MOVIE_FILTER_ATTRIBUTES[0]),
        }
    }

    pub fn state(&self) -> &Resource<Vec<FilmSummary>> {
        self.resource.state()
    }

    pub fn films(&self) -> &[FilmSummary] {
        self.resource.value().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn begin_load(&mut self) -> u64 {
        self.resource.begin()
    }

    pub fn complete_load(
        &mut self,
        ticket: u64,
        result: Result<Vec<FilmSummary>, ClientError>,
    ) -> bool {
        match result {
            Ok(films) => {
                let committed = self.resource.commit_ok(ticket, films);
                if committed {
                    let films = self.films().to_vec();
                    self.table
                        .selection
                        .retain(|id| films.iter().any(|film| film.film_id == id));
                }
                committed
            }
            Err(err) => self.resource.commit_err(ticket, &err),
        }
    }

    pub async fn refresh(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let ticket = self.begin_load();
        match client.list_films().await {
            Ok(films) => {
                self.complete_load(ticket, Ok(films));
                Ok(())
            }
            Err(err) => {
                self.resource.commit_err(ticket, &err);
                Err(err)
            }
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.table.pagination.set_page(0);
    }

    /// Only the toolbar's two attributes are accepted.
    pub fn set_filter_attribute(&mut self, key: &str) -> bool {
        if !MOVIE_FILTER_ATTRIBUTES.contains(&key) {
            return false;
        }
        self.filter.attribute = key.to_string();
        true
    }

    pub fn on_sort(&mut self, key: &str) -> bool {
        if column_by_key(&MOVIE_COLUMNS, key).is_none() {
            return false;
        }
        self.table.on_sort(key);
        true
    }

    pub fn filtered(&self) -> Vec<FilmSummary> {
        let order_by = column_by_key(&MOVIE_COLUMNS, &self.table.order_by)
            .copied()
            .unwrap_or(MOVIE_COLUMNS[1]);
        let attribute = column_by_key(&MOVIE_COLUMNS, &self.filter.attribute)
            .copied()
            .unwrap_or(MOVIE_COLUMNS[1]);
        apply_filter(
            self.films(),
            comparator(self.table.order, order_by),
            &self.filter.query,
            attribute,
        )
    }

    pub fn visible_page(&self) -> Vec<FilmSummary> {
        let filtered = self.filtered();
        self.table.pagination.slice(&filtered).to_vec()
    }

    pub fn toggle(&mut self, id: FilmId) {
        self.table.on_select_row(id);
    }

    pub fn select_all(&mut self, checked: bool) {
        let ids: Vec<FilmId> = self.filtered().iter().map(|film| film.film_id).collect();
        self.table.on_select_all(checked, ids);
    }
}
