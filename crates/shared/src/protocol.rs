use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{FilmId, OrderId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_id: OrderId,
    pub username: String,
    pub film_name: String,
    pub cinema_name: String,
    pub room_name: String,
    pub show_date: DateTime<Utc>,
    pub total_price: f64,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmSummary {
    pub film_id: FilmId,
    pub film_name: String,
    pub film_describe: String,
}

/// Header row of an order detail payload. The backend returns it as a
/// one-element array; only these fields are guaranteed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub username: String,
    pub film_name: String,
    pub show_date: DateTime<Utc>,
    pub total_price: f64,
    pub order_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketLine {
    pub cinema_name: String,
    pub room_name: String,
    pub seat_row: String,
    pub seat_number: i64,
    pub ticket_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopcornLine {
    pub combo_name: String,
    pub combo_price: f64,
    pub combo_quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub order: Vec<OrderLine>,
    #[serde(rename = "Ticket_Seat_Room")]
    pub ticket_seat_room: Vec<TicketLine>,
    pub popcorn: Vec<PopcornLine>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilmRef {
    pub film_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRef {
    pub room_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CinemaRef {
    pub cinema_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowtimeSlot {
    pub show_date: DateTime<Utc>,
    pub show_time: NaiveTime,
}

/// Wire shape of `GET /api/admin/showtimes/detail/{id}`: four parallel
/// one-element arrays. Consumers read the first element of each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShowtimeDetailResponse {
    pub film: Vec<FilmRef>,
    pub room: Vec<RoomRef>,
    pub cinema: Vec<CinemaRef>,
    #[serde(rename = "showTime")]
    pub show_time: Vec<ShowtimeSlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowtimeEditRequest {
    pub film_name: String,
    pub room_name: String,
    pub cinema_name: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
}

/// Error envelope the backend attaches to non-2xx responses. The message
/// field is best-effort; some endpoints return an empty body instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}
