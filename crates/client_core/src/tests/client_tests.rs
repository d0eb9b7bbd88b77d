use super::*;
use std::collections::HashSet;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response as AxumResponse},
    routing::{delete, get, patch},
    Json, Router,
};
use chrono::{TimeZone, Utc};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct AdminServerState {
    orders: Arc<Mutex<Vec<OrderSummary>>>,
    order_hits: Arc<Mutex<u32>>,
    auth_headers: Arc<Mutex<Vec<String>>>,
    fail_orders_with: Arc<Mutex<Option<(u16, Option<String>)>>>,
    deleted: Arc<Mutex<Vec<i64>>>,
    fail_delete_ids: Arc<Mutex<HashSet<i64>>>,
    edits: Arc<Mutex<Vec<(i64, serde_json::Value)>>>,
}

fn sample_order(id: i64, username: &str, film_name: &str, total_price: f64) -> OrderSummary {
    OrderSummary {
        order_id: OrderId(id),
        username: username.to_string(),
        film_name: film_name.to_string(),
        cinema_name: "Galaxy Nguyen Du".to_string(),
        room_name: "Room 1".to_string(),
        show_date: Utc
            .with_ymd_and_hms(2024, 5, 1, 19, 30, 0)
            .single()
            .expect("show date"),
        total_price,
        order_date: Utc
            .with_ymd_and_hms(2024, 4, 28, 10, 0, 0)
            .single()
            .expect("order date"),
    }
}

async fn handle_list_orders(
    State(state): State<AdminServerState>,
    headers: HeaderMap,
) -> AxumResponse {
    *state.order_hits.lock().await += 1;
    if let Some(auth) = headers.get("authorization").and_then(|v| v.to_str().ok()) {
        state.auth_headers.lock().await.push(auth.to_string());
    }
    if let Some((status, message)) = state.fail_orders_with.lock().await.clone() {
        let status = StatusCode::from_u16(status).expect("status");
        return match message {
            Some(message) => (status, Json(ApiErrorBody { message })).into_response(),
            None => status.into_response(),
        };
    }
    Json(state.orders.lock().await.clone()).into_response()
}

async fn handle_delete_order(
    State(state): State<AdminServerState>,
    Path(id): Path<i64>,
) -> AxumResponse {
    if state.fail_delete_ids.lock().await.contains(&id) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorBody {
                message: format!("cannot delete order {id}"),
            }),
        )
            .into_response();
    }
    state.deleted.lock().await.push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn handle_order_detail(Path(id): Path<i64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "order": [{
            "order_id": id,
            "username": "lan",
            "film_name": "Dune",
            "show_date": "2024-05-01T19:30:00Z",
            "total_price": 250000.0,
            "order_date": "2024-04-28T10:00:00Z"
        }],
        "Ticket_Seat_Room": [{
            "cinema_name": "Galaxy Nguyen Du",
            "room_name": "Room 1",
            "seat_row": "C",
            "seat_number": 12,
            "ticket_price": 90000.0
        }],
        "popcorn": [{
            "combo_name": "Combo 1",
            "combo_price": 79000.0,
            "combo_quantity": 2
        }]
    }))
}

async fn handle_showtime_detail(Path(_id): Path<i64>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "film": [{"film_name": "Dune"}],
        "room": [{"room_name": "Room 2"}],
        "cinema": [{"cinema_name": "Galaxy Nguyen Du"}],
        "showTime": [{"show_date": "2024-05-01T00:00:00Z", "show_time": "19:30:00"}]
    }))
}

async fn handle_edit_showtime(
    State(state): State<AdminServerState>,
    Path(id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> StatusCode {
    state.edits.lock().await.push((id, body));
    StatusCode::OK
}

async fn handle_list_films() -> Json<serde_json::Value> {
    Json(serde_json::json!([
        {"film_id": 1, "film_name": "Dune", "film_describe": "epic sci-fi"},
        {"film_id": 2, "film_name": "Amelie", "film_describe": "romance"}
    ]))
}

async fn spawn_admin_server(state: AdminServerState) -> Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = Router::new()
        .route("/api/admin/orders", get(handle_list_orders))
        .route("/api/admin/orders/delete/:id", delete(handle_delete_order))
        .route("/api/admin/orders/detail/:id", get(handle_order_detail))
        .route("/api/admin/showtimes/detail/:id", get(handle_showtime_detail))
        .route("/api/admin/showtimes/edit/:id", patch(handle_edit_showtime))
        .route("/api/admin/films", get(handle_list_films))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn client_for(url: &str) -> AdminClient {
    AdminClient::with_session(Url::parse(url).expect("url"), Session::new("test-token"))
}

#[tokio::test]
async fn list_orders_decodes_rows_and_sends_the_bearer() {
    let state = AdminServerState::default();
    *state.orders.lock().await = vec![
        sample_order(1, "lan", "Dune", 250000.0),
        sample_order(2, "minh", "Amelie", 90000.0),
    ];
    let url = spawn_admin_server(state.clone()).await.expect("spawn server");

    let orders = client_for(&url).list_orders().await.expect("list orders");
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].order_id, OrderId(1));
    assert_eq!(orders[1].username, "minh");

    let auth_headers = state.auth_headers.lock().await.clone();
    assert_eq!(auth_headers, vec!["Bearer test-token".to_string()]);
}

#[tokio::test]
async fn requests_abort_locally_without_a_credential() {
    let state = AdminServerState::default();
    let url = spawn_admin_server(state.clone()).await.expect("spawn server");

    let client = AdminClient::new(Url::parse(&url).expect("url"));
    let err = client.list_orders().await.expect_err("must fail");
    assert!(matches!(err, ClientError::MissingCredential));
    assert_eq!(*state.order_hits.lock().await, 0);
}

#[tokio::test]
async fn error_status_with_an_envelope_surfaces_the_message() {
    let state = AdminServerState::default();
    *state.fail_orders_with.lock().await = Some((500, Some("database offline".to_string())));
    let url = spawn_admin_server(state).await.expect("spawn server");

    let err = client_for(&url).list_orders().await.expect_err("must fail");
    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("database offline"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn error_status_without_a_body_has_no_message() {
    let state = AdminServerState::default();
    *state.fail_orders_with.lock().await = Some((404, None));
    let url = spawn_admin_server(state).await.expect("spawn server");

    let err = client_for(&url).list_orders().await.expect_err("must fail");
    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client_for(&format!("http://{addr}"))
        .list_orders()
        .await
        .expect_err("must fail");
    assert!(matches!(err, ClientError::Network { .. }));
}

#[tokio::test]
async fn delete_order_hits_the_expected_route() {
    let state = AdminServerState::default();
    let url = spawn_admin_server(state.clone()).await.expect("spawn server");

    client_for(&url)
        .delete_order(OrderId(7))
        .await
        .expect("delete");
    assert_eq!(state.deleted.lock().await.clone(), vec![7]);
}

#[tokio::test]
async fn rejected_delete_carries_the_server_message() {
    let state = AdminServerState::default();
    state.fail_delete_ids.lock().await.insert(3);
    let url = spawn_admin_server(state.clone()).await.expect("spawn server");

    let err = client_for(&url)
        .delete_order(OrderId(3))
        .await
        .expect_err("must fail");
    match err {
        ClientError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message.as_deref(), Some("cannot delete order 3"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(state.deleted.lock().await.is_empty());
}

#[tokio::test]
async fn order_detail_decodes_the_wire_shape() {
    let state = AdminServerState::default();
    let url = spawn_admin_server(state).await.expect("spawn server");

    let detail = client_for(&url)
        .order_detail(OrderId(7))
        .await
        .expect("detail");
    assert_eq!(detail.order.len(), 1);
    assert_eq!(detail.order[0].order_id, OrderId(7));
    assert_eq!(detail.ticket_seat_room[0].seat_number, 12);
    assert_eq!(detail.popcorn[0].combo_quantity, 2);
}

#[tokio::test]
async fn edit_showtime_sends_the_patch_body() {
    let state = AdminServerState::default();
    let url = spawn_admin_server(state.clone()).await.expect("spawn server");

    let edit = ShowtimeEditRequest {
        film_name: "Dune".to_string(),
        room_name: "Room 2".to_string(),
        cinema_name: "Galaxy Nguyen Du".to_string(),
        show_date: chrono::NaiveDate::from_ymd_opt(2024, 6, 2).expect("date"),
        show_time: chrono::NaiveTime::from_hms_opt(21, 0, 0).expect("time"),
    };
    client_for(&url)
        .edit_showtime(ShowtimeId(5), &edit)
        .await
        .expect("edit");

    let edits = state.edits.lock().await.clone();
    assert_eq!(edits.len(), 1);
    let (id, body) = &edits[0];
    assert_eq!(*id, 5);
    assert_eq!(body["film_name"], "Dune");
    assert_eq!(body["show_date"], "2024-06-02");
    assert_eq!(body["show_time"], "21:00:00");
}

#[tokio::test]
async fn list_films_decodes_summaries() {
    let state = AdminServerState::default();
    let url = spawn_admin_server(state).await.expect("spawn server");

    let films = client_for(&url).list_films().await.expect("films");
    assert_eq!(films.len(), 2);
    assert_eq!(films[0].film_name, "Dune");
    assert_eq!(films[1].film_describe, "romance");
}
