use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    domain::{OrderId, ShowtimeId},
    protocol::{
        ApiErrorBody, FilmSummary, OrderDetailResponse, OrderSummary, ShowtimeDetailResponse,
        ShowtimeEditRequest,
    },
};
use tracing::{info, warn};
use url::Url;

pub mod error;
pub mod resource;
pub mod session;
pub mod views;

pub use error::ClientError;
pub use resource::{Resource, ResourceSlot};
pub use session::{Session, SessionStore};

/// HTTP client for the admin endpoints. Every call requires a stored
/// [`Session`]; without one it fails with
/// [`ClientError::MissingCredential`] before touching the network.
pub struct AdminClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl AdminClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn with_session(base_url: Url, session: Session) -> Self {
        let mut client = Self::new(base_url);
        client.session = Some(session);
        client
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_orders(&self) -> Result<Vec<OrderSummary>, ClientError> {
        self.get_json("/api/admin/orders").await
    }

    pub async fn order_detail(
        &self,
        order_id: OrderId,
    ) -> Result<OrderDetailResponse, ClientError> {
        self.get_json(&format!("/api/admin/orders/detail/{}", order_id.0))
            .await
    }

    pub async fn delete_order(&self, order_id: OrderId) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/admin/orders/delete/{}", order_id.0));
        let bearer = self.bearer()?;
        info!(order_id = order_id.0, "deleting order");
        let response = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|source| ClientError::Network {
                url: url.clone(),
                source,
            })?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn showtime_detail(
        &self,
        showtime_id: ShowtimeId,
    ) -> Result<ShowtimeDetailResponse, ClientError> {
        self.get_json(&format!("/api/admin/showtimes/detail/{}", showtime_id.0))
            .await
    }

    pub async fn edit_showtime(
        &self,
        showtime_id: ShowtimeId,
        edit: &ShowtimeEditRequest,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/admin/showtimes/edit/{}", showtime_id.0));
        let bearer = self.bearer()?;
        info!(
            showtime_id = showtime_id.0,
            film_name = edit.film_name.as_str(),
            "updating showtime"
        );
        let response = self
            .patch_json(&url, &bearer, edit)
            .await
            .map_err(|source| ClientError::Network {
                url: url.clone(),
                source,
            })?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    pub async fn list_films(&self) -> Result<Vec<FilmSummary>, ClientError> {
        self.get_json("/api/admin/films").await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<String, ClientError> {
        self.session
            .as_ref()
            .map(Session::bearer)
            .ok_or(ClientError::MissingCredential)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.endpoint(path);
        let bearer = self.bearer()?;
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, bearer)
            .send()
            .await
            .map_err(|source| ClientError::Network {
                url: url.clone(),
                source,
            })?;
        let response = Self::ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|source| ClientError::Network { url, source })
    }

    async fn patch_json<B: Serialize>(
        &self,
        url: &str,
        bearer: &str,
        body: &B,
    ) -> Result<Response, reqwest::Error> {
        self.http
            .patch(url)
            .header(AUTHORIZATION, bearer)
            .json(body)
            .send()
            .await
    }

    /// Maps a non-2xx response to [`ClientError::Http`], pulling the
    /// message out of the backend's error envelope when there is one.
    async fn ensure_success(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .map(|body| body.message);
        warn!(status = status.as_u16(), "admin api returned an error status");
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/client_tests.rs"]
mod client_tests;

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod view_tests;
