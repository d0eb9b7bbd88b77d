use shared::domain::OrderId;
use shared::protocol::OrderSummary;
use table_core::column::column_by_key;
use table_core::{apply_filter, comparator, Column, FilterState, SortKey, TableState};

use crate::error::ClientError;
use crate::resource::{Resource, ResourceSlot};
use crate::AdminClient;

fn order_id_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::Integer(order.order_id.0))
}

fn username_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::Text(order.username.clone()))
}

fn film_name_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::Text(order.film_name.clone()))
}

fn cinema_name_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::Text(order.cinema_name.clone()))
}

fn room_name_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::Text(order.room_name.clone()))
}

fn show_date_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::DateTime(order.show_date))
}

fn total_price_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::Float(order.total_price))
}

fn order_date_key(order: &OrderSummary) -> Option<SortKey> {
    Some(SortKey::DateTime(order.order_date))
}

pub const ORDER_COLUMNS: [Column<OrderSummary>; 8] = [
    Column::new("order_id", order_id_key),
    Column::new("username", username_key),
    Column::new("film_name", film_name_key),
    Column::new("cinema_name", cinema_name_key),
    Column::new("room_name", room_name_key),
    Column::new("show_date", show_date_key),
    Column::new("total_price", total_price_key),
    Column::new("order_date", order_date_key),
];

const DEFAULT_SORT: &str = "order_id";
const DEFAULT_FILTER_ATTRIBUTE: &str = "username";

/// Result of a sequential bulk delete. Ids in `deleted` are gone on the
/// server and pruned locally; `failed` names the first rejection, which
/// also stopped the remaining selection from being attempted.
#[derive(Debug)]
pub struct BulkDeleteOutcome {
    pub deleted: Vec<OrderId>,
    pub failed: Option<(OrderId, ClientError)>,
}

impl BulkDeleteOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_none()
    }
}

/// The order management screen: the fetched order collection plus its
/// sort, filter, selection, and pagination state.
pub struct OrderListView {
    resource: ResourceSlot<Vec<OrderSummary>>,
    pub table: TableState<OrderId>,
    pub filter: FilterState,
}

impl Default for OrderListView {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderListView {
    pub fn new() -> Self {
        Self {
            resource: ResourceSlot::new(),
            table: TableState::new(DEFAULT_SORT),
            filter: FilterState::new(DEFAULT_FILTER_ATTRIBUTE),
        }
    }

    pub fn state(&self) -> &Resource<Vec<OrderSummary>> {
        self.resource.state()
    }

    pub fn orders(&self) -> &[OrderSummary] {
        self.resource.value().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Starts a load and returns the ticket its completion must present.
    pub fn begin_load(&mut self) -> u64 {
        self.resource.begin()
    }

    /// Lands a load outcome. A stale ticket changes nothing and returns
    /// false. On success the selection drops ids the new collection no
    /// longer contains.
    pub fn complete_load(
        &mut self,
        ticket: u64,
        result: Result<Vec<OrderSummary>, ClientError>,
    ) -> bool {
        match result {
            Ok(orders) => {
                let committed = self.resource.commit_ok(ticket, orders);
                if committed {
                    let orders = self.orders().to_vec();
                    self.table
                        .selection
                        .retain(|id| orders.iter().any(|order| order.order_id == id));
                }
                committed
            }
            Err(err) => self.resource.commit_err(ticket, &err),
        }
    }

    pub async fn refresh(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let ticket = self.begin_load();
        match client.list_orders().await {
            Ok(orders) => {
                self.complete_load(ticket, Ok(orders));
                Ok(())
            }
            Err(err) => {
                self.resource.commit_err(ticket, &err);
                Err(err)
            }
        }
    }

    /// Filter text changes always jump back to the first page.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.filter.query = query.into();
        self.table.pagination.set_page(0);
    }

    /// Switches which attribute the filter text matches against. Unknown
    /// keys are rejected.
    pub fn set_filter_attribute(&mut self, key: &str) -> bool {
        if column_by_key(&ORDER_COLUMNS, key).is_none() {
            return false;
        }
        self.filter.attribute = key.to_string();
        true
    }

    /// Header click. Unknown keys are rejected.
    pub fn on_sort(&mut self, key: &str) -> bool {
        if column_by_key(&ORDER_COLUMNS, key).is_none() {
            return false;
        }
        self.table.on_sort(key);
        true
    }

    /// The full sorted, filtered collection in display order.
    pub fn filtered(&self) -> Vec<OrderSummary> {
        let order_by = column_by_key(&ORDER_COLUMNS, &self.table.order_by)
            .copied()
            .unwrap_or(ORDER_COLUMNS[0]);
        let attribute = column_by_key(&ORDER_COLUMNS, &self.filter.attribute)
            .copied()
            .unwrap_or(ORDER_COLUMNS[1]);
        apply_filter(
            self.orders(),
            comparator(self.table.order, order_by),
            &self.filter.query,
            attribute,
        )
    }

    /// The slice of [`filtered`](Self::filtered) on the current page.
    pub fn visible_page(&self) -> Vec<OrderSummary> {
        let filtered = self.filtered();
        self.table.pagination.slice(&filtered).to_vec()
    }

    pub fn toggle(&mut self, id: OrderId) {
        self.table.on_select_row(id);
    }

    /// Header checkbox over the whole filtered collection, not just the
    /// visible page.
    pub fn select_all(&mut self, checked: bool) {
        let ids: Vec<OrderId> = self.filtered().iter().map(|order| order.order_id).collect();
        self.table.on_select_all(checked, ids);
    }

    /// Deletes one order and prunes it from the collection and the
    /// selection.
    pub async fn delete_order(
        &mut self,
        client: &AdminClient,
        id: OrderId,
    ) -> Result<(), ClientError> {
        client.delete_order(id).await?;
        self.remove_orders(&[id]);
        Ok(())
    }

    /// Deletes the selected orders one request at a time, in selection
    /// order, stopping at the first failure. Orders deleted before the
    /// failure stay deleted; the local collection and selection are
    /// pruned in one step when the walk ends.
    pub async fn delete_selected(&mut self, client: &AdminClient) -> BulkDeleteOutcome {
        let ids: Vec<OrderId> = self.table.selection.ids().to_vec();
        let mut deleted = Vec::new();
        let mut failed = None;
        for id in ids {
            match client.delete_order(id).await {
                Ok(()) => deleted.push(id),
                Err(err) => {
                    failed = Some((id, err));
                    break;
                }
            }
        }
        self.remove_orders(&deleted);
        BulkDeleteOutcome { deleted, failed }
    }

    fn remove_orders(&mut self, ids: &[OrderId]) {
        if let Some(orders) = self.resource.value_mut() {
            orders.retain(|order| !ids.contains(&order.order_id));
        }
        self.table.selection.retain(|id| !ids.contains(&id));
    }
}
