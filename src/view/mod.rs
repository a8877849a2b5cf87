use std::sync::Arc;
use futures::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tracing::{debug, warn};
use crate::models::place::{Location, Place, PlaceDetails};
use crate::models::search::SearchCriteria;

pub mod presenter;
pub mod relay;

pub use presenter::{DetailPanel, ListRow, MapOverlay, MapSettings, Marker};
pub use relay::{ClientError, HttpRelay, PlacesRelay};

pub const INVALID_CRITERIA_MESSAGE: &str = "Please enter an activity and select a radius.";
pub const SEARCH_FAILED_MESSAGE: &str = "An error occurred during the search, please try again.";
pub const NO_RESULTS_MESSAGE: &str = "No places found for this search.";
pub const MAP_KEY_FAILED_MESSAGE: &str = "The map could not be loaded.";

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    ResultsShown,
    DetailShown,
}

#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub enum Message {
    Info(String),
    Error(String),
}

/// Minted per selection, details are only applied for the current one.
#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq, Hash)]
pub struct SelectionToken(u64);

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Selection {
    pub token: SelectionToken,
    pub index: usize,
    pub place: Place,
    pub details: Option<PlaceDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailsRequest {
    pub token: SelectionToken,
    pub place_id: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailsOutcome {
    Applied,
    Stale,
    Failed,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ViewState {
    results: Option<Vec<Place>>,
    selection: Option<Selection>,
    hovered: Option<usize>,
    message: Option<Message>,
    map_key: Option<String>,
    map_settings: MapSettings,
}

impl ViewState {
    fn new(map_settings: MapSettings) -> Self {
        Self {
            results: None,
            selection: None,
            hovered: None,
            message: None,
            map_key: None,
            map_settings,
        }
    }

    pub fn mode(&self) -> ViewMode {
        match (&self.selection, &self.results) {
            (Some(_), _) => ViewMode::DetailShown,
            (None, Some(_)) => ViewMode::ResultsShown,
            (None, None) => ViewMode::Browsing,
        }
    }

    pub fn places(&self) -> &[Place] {
        self.results.as_deref().unwrap_or_default()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    pub fn map_key(&self) -> Option<&str> {
        self.map_key.as_deref()
    }

    pub fn map_settings(&self) -> MapSettings {
        self.map_settings
    }

    pub fn shows_map(&self) -> bool {
        self.map_key.is_some() && !self.places().is_empty()
    }
}

pub struct ViewController<R> {
    relay: Arc<R>,
    state: ViewState,
    last_token: u64,
}

impl<R: PlacesRelay + 'static> ViewController<R> {
    pub fn new(relay: R) -> Self {
        Self::with_map_settings(Arc::new(relay), MapSettings::default())
    }

    pub fn with_map_settings(relay: Arc<R>, map_settings: MapSettings) -> Self {
        Self {
            relay,
            state: ViewState::new(map_settings),
            last_token: 0,
        }
    }

    pub fn centered_on(relay: Arc<R>, center: Location) -> Self {
        Self::with_map_settings(relay, MapSettings::centered_on(center))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn mode(&self) -> ViewMode {
        self.state.mode()
    }

    pub fn search_task(
        &mut self,
        criteria: SearchCriteria,
    ) -> Result<BoxFuture<'static, Result<Vec<Place>, ClientError>>, ClientError> {
        if criteria.keyword().is_none() {
            self.state.message = Some(Message::Error(INVALID_CRITERIA_MESSAGE.to_string()));
            return Err(ClientError::InvalidCriteria(INVALID_CRITERIA_MESSAGE.to_string()));
        }

        let relay = Arc::clone(&self.relay);
        let criteria = SearchCriteria::new(criteria.activity.trim(), criteria.radius);
        Ok(async move { relay.search(&criteria).await }.boxed())
    }

    /// Applies a search response. Whichever response is applied last wins.
    pub fn apply_search(
        &mut self,
        result: Result<Vec<Place>, ClientError>,
    ) -> Result<usize, ClientError> {
        match result {
            Ok(places) => {
                let count = places.len();
                self.state.message = if places.is_empty() {
                    Some(Message::Info(NO_RESULTS_MESSAGE.to_string()))
                } else {
                    None
                };
                self.state.results = Some(places);
                self.state.selection = None;
                self.state.hovered = None;
                debug!("Showing {} places", count);
                Ok(count)
            }
            Err(e) => {
                warn!("Search failed, keeping the previous results: {}", e);
                self.state.message = Some(Message::Error(SEARCH_FAILED_MESSAGE.to_string()));
                Err(e)
            }
        }
    }

    pub async fn submit_search(&mut self, criteria: SearchCriteria) -> Result<usize, ClientError> {
        let task = self.search_task(criteria)?;
        let result = task.await;
        self.apply_search(result)
    }

    pub fn select_place(&mut self, index: usize) -> Option<DetailsRequest> {
        let place = self.state.places().get(index)?.clone();

        self.last_token += 1;
        let token = SelectionToken(self.last_token);
        let request = DetailsRequest {
            token,
            place_id: place.place_id.clone(),
        };
        self.state.selection = Some(Selection {
            token,
            index,
            place,
            details: None,
        });
        self.state.hovered = None;
        Some(request)
    }

    pub fn details_task(
        &self,
        request: &DetailsRequest,
    ) -> BoxFuture<'static, Result<PlaceDetails, ClientError>> {
        let relay = Arc::clone(&self.relay);
        let place_id = request.place_id.clone();
        async move { relay.details(&place_id).await }.boxed()
    }

    pub fn apply_details(
        &mut self,
        request: &DetailsRequest,
        result: Result<PlaceDetails, ClientError>,
    ) -> DetailsOutcome {
        let selection = match self.state.selection.as_mut() {
            Some(selection) if selection.token == request.token => selection,
            _ => {
                debug!("Dropping details for {}, selection has moved on", request.place_id);
                return DetailsOutcome::Stale;
            }
        };

        match result {
            Ok(details) => {
                selection.details = Some(details);
                DetailsOutcome::Applied
            }
            Err(e) => {
                warn!("Failed to load details for {}: {}", request.place_id, e);
                DetailsOutcome::Failed
            }
        }
    }

    pub async fn select_and_load(&mut self, index: usize) -> Option<DetailsOutcome> {
        let request = self.select_place(index)?;
        let result = self.details_task(&request).await;
        Some(self.apply_details(&request, result))
    }

    pub fn clear_selection(&mut self) {
        self.state.selection = None;
        self.state.hovered = None;
    }

    pub fn hover(&mut self, index: Option<usize>) {
        self.state.hovered = index.filter(|index| *index < self.state.places().len());
    }

    pub async fn load_provider_key(&mut self) -> Result<(), ClientError> {
        match self.relay.provider_key().await {
            Ok(key) => {
                self.state.map_key = Some(key);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to retrieve the map key: {}", e);
                self.state.message = Some(Message::Error(MAP_KEY_FAILED_MESSAGE.to_string()));
                Err(e)
            }
        }
    }
}
