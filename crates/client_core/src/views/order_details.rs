use shared::domain::OrderId;
use shared::protocol::{OrderDetailResponse, OrderLine, PopcornLine, TicketLine};

use crate::error::ClientError;
use crate::resource::{Resource, ResourceSlot};
use crate::AdminClient;

/// Read-only detail screen for one order: the header line plus its
/// ticket and popcorn positions.
pub struct OrderDetailsView {
    order_id: OrderId,
    resource: ResourceSlot<OrderDetailResponse>,
}

impl OrderDetailsView {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            resource: ResourceSlot::new(),
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn state(&self) -> &Resource<OrderDetailResponse> {
        self.resource.state()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.resource.begin()
    }

    pub fn complete_load(
        &mut self,
        ticket: u64,
        result: Result<OrderDetailResponse, ClientError>,
    ) -> bool {
        match result {
            Ok(detail) => self.resource.commit_ok(ticket, detail),
            Err(err) => self.resource.commit_err(ticket, &err),
        }
    }

    pub async fn refresh(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let ticket = self.begin_load();
        match client.order_detail(self.order_id).await {
            Ok(detail) => {
                self.complete_load(ticket, Ok(detail));
                Ok(())
            }
            Err(err) => {
                self.resource.commit_err(ticket, &err);
                Err(err)
            }
        }
    }

    /// First element of the order array, or `None` when the backend
    /// sent an empty one.
    pub fn header(&self) -> Option<&OrderLine> {
        self.resource.value().and_then(|detail| detail.order.first())
    }

    pub fn tickets(&self) -> &[TicketLine] {
        self.resource
            .value()
            .map(|detail| detail.ticket_seat_room.as_slice())
            .unwrap_or(&[])
    }

    pub fn popcorn(&self) -> &[PopcornLine] {
        self.resource
            .value()
            .map(|detail| detail.popcorn.as_slice())
            .unwrap_or(&[])
    }
}
