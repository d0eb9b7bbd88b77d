use chrono::{NaiveDate, NaiveTime};
use shared::domain::ShowtimeId;
use shared::protocol::{ShowtimeDetailResponse, ShowtimeEditRequest};
use tracing::warn;

use crate::error::ClientError;
use crate::resource::{Resource, ResourceSlot};
use crate::AdminClient;

/// The editable fields of a showtime, prefilled from the detail
/// endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowtimeForm {
    pub film_name: String,
    pub room_name: String,
    pub cinema_name: String,
    pub show_date: NaiveDate,
    pub show_time: NaiveTime,
}

impl ShowtimeForm {
    fn from_detail(detail: &ShowtimeDetailResponse) -> Result<Self, ClientError> {
        let film = detail
            .film
            .first()
            .ok_or_else(|| ClientError::unexpected("showtime detail has no film"))?;
        let room = detail
            .room
            .first()
            .ok_or_else(|| ClientError::unexpected("showtime detail has no room"))?;
        let cinema = detail
            .cinema
            .first()
            .ok_or_else(|| ClientError::unexpected("showtime detail has no cinema"))?;
        let slot = detail
            .show_time
            .first()
            .ok_or_else(|| ClientError::unexpected("showtime detail has no slot"))?;
        Ok(Self {
            film_name: film.film_name.clone(),
            room_name: room.room_name.clone(),
            cinema_name: cinema.cinema_name.clone(),
            show_date: slot.show_date.date_naive(),
            show_time: slot.show_time,
        })
    }

    fn to_request(&self) -> ShowtimeEditRequest {
        ShowtimeEditRequest {
            film_name: self.film_name.clone(),
            room_name: self.room_name.clone(),
            cinema_name: self.cinema_name.clone(),
            show_date: self.show_date,
            show_time: self.show_time,
        }
    }
}

/// Edit screen for one showtime. The form tracks local edits; a failed
/// submit rolls it back to the last state the server confirmed.
pub struct ShowtimeEditView {
    showtime_id: ShowtimeId,
    resource: ResourceSlot<ShowtimeForm>,
    snapshot: Option<ShowtimeForm>,
    film_options: Vec<String>,
}

impl ShowtimeEditView {
    pub fn new(showtime_id: ShowtimeId) -> Self {
        Self {
            showtime_id,
            resource: ResourceSlot::new(),
            snapshot: None,
            film_options: Vec::new(),
        }
    }

    pub fn showtime_id(&self) -> ShowtimeId {
        self.showtime_id
    }

    pub fn state(&self) -> &Resource<ShowtimeForm> {
        self.resource.state()
    }

    pub fn form(&self) -> Option<&ShowtimeForm> {
        self.resource.value()
    }

    pub fn form_mut(&mut self) -> Option<&mut ShowtimeForm> {
        self.resource.value_mut()
    }

    pub fn begin_load(&mut self) -> u64 {
        self.resource.begin()
    }

    pub fn complete_load(
        &mut self,
        ticket: u64,
        result: Result<ShowtimeForm, ClientError>,
    ) -> bool {
        match result {
            Ok(form) => {
                let committed = self.resource.commit_ok(ticket, form.clone());
                if committed {
                    self.snapshot = Some(form);
                }
                committed
            }
            Err(err) => self.resource.commit_err(ticket, &err),
        }
    }

    pub async fn refresh(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let ticket = self.begin_load();
        let result = client
            .showtime_detail(self.showtime_id)
            .await
            .and_then(|detail| ShowtimeForm::from_detail(&detail));
        match result {
            Ok(form) => {
                self.complete_load(ticket, Ok(form));
                Ok(())
            }
            Err(err) => {
                self.resource.commit_err(ticket, &err);
                Err(err)
            }
        }
    }

    /// Film names offered by the form's film picker.
    pub async fn load_film_options(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let films = client.list_films().await?;
        self.film_options = films.into_iter().map(|film| film.film_name).collect();
        Ok(())
    }

    pub fn film_options(&self) -> &[String] {
        &self.film_options
    }

    /// Sends the current form. On rejection the form snaps back to the
    /// last server-confirmed state and the error is returned; on
    /// success that confirmed state advances to the submitted form.
    pub async fn submit(&mut self, client: &AdminClient) -> Result<(), ClientError> {
        let form = self
            .form()
            .cloned()
            .ok_or_else(|| ClientError::unexpected("no showtime form loaded"))?;
        match client.edit_showtime(self.showtime_id, &form.to_request()).await {
            Ok(()) => {
                self.snapshot = Some(form);
                Ok(())
            }
            Err(err) => {
                warn!(showtime_id = self.showtime_id.0, "showtime edit rejected, restoring form");
                if let (Some(slot), Some(snapshot)) = (self.resource.value_mut(), &self.snapshot) {
                    *slot = snapshot.clone();
                }
                Err(err)
            }
        }
    }
}
