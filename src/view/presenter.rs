use reqwest::Url;
use serde::Serialize;
use crate::models::place::{Location, Place, DEFAULT_SEARCH_ORIGIN};
use crate::view::ViewState;

pub const PHOTO_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/place/photo";
pub const DETAIL_PHOTO_MAX_WIDTH: u32 = 400;

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct ListRow {
    pub index: usize,
    pub name: String,
    pub vicinity: String,
    pub rating_label: String,
    pub open_now: Option<bool>,
    pub hovered: bool,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct DetailPanel {
    pub name: String,
    pub address: Option<String>,
    pub category: Option<String>,
    pub open_now: Option<bool>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u64>,
    pub phone_number: Option<String>,
    pub website: Option<String>,
    pub photo_url: Option<String>,
    pub details_loaded: bool,
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct MapSettings {
    pub center: Location,
    pub zoom: u8,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl MapSettings {
    pub fn centered_on(center: Location) -> Self {
        Self {
            center,
            ..Self::default()
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: DEFAULT_SEARCH_ORIGIN,
            zoom: 11,
            min_zoom: 9,
            max_zoom: 18,
        }
    }
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub title: String,
    pub position: Location,
    pub highlighted: bool,
}

#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct MapOverlay {
    pub settings: MapSettings,
    pub markers: Vec<Marker>,
}

pub fn photo_url(photo_reference: &str, max_width: u32, api_key: &str) -> Option<String> {
    Url::parse_with_params(
        PHOTO_ENDPOINT,
        &[
            ("maxwidth", max_width.to_string()),
            ("photoreference", photo_reference.to_string()),
            ("key", api_key.to_string()),
        ],
    )
    .ok()
    .map(String::from)
}

/// Equal ratings keep the provider's order.
pub fn top_rated(places: &[Place], limit: usize, min_rating: Option<f64>) -> Vec<&Place> {
    let mut rated: Vec<(&Place, f64)> = places
        .iter()
        .filter_map(|place| place.rating.map(|rating| (place, rating)))
        .filter(|(_, rating)| min_rating.map_or(true, |min| *rating >= min))
        .collect();

    rated.sort_by(|(_, a), (_, b)| b.total_cmp(a));
    rated.into_iter().take(limit).map(|(place, _)| place).collect()
}

fn category_label(types: &[String]) -> Option<String> {
    let label = types
        .iter()
        .take(2)
        .map(|kind| kind.replace('_', " "))
        .collect::<Vec<_>>()
        .join(", ");
    Some(label).filter(|label| !label.is_empty())
}

impl ViewState {
    pub fn list_rows(&self) -> Vec<ListRow> {
        self.places()
            .iter()
            .enumerate()
            .map(|(index, place)| ListRow {
                index,
                name: place.name.clone(),
                vicinity: place.vicinity.clone().unwrap_or_default(),
                rating_label: place
                    .rating
                    .map(|rating| rating.to_string())
                    .unwrap_or_else(|| "No rating".to_string()),
                open_now: place.is_open_now(),
                hovered: self.hovered() == Some(index),
            })
            .collect()
    }

    pub fn detail_panel(&self) -> Option<DetailPanel> {
        let selection = self.selection()?;
        let place = &selection.place;
        let details = selection.details.clone().unwrap_or_default();

        let photo_reference = details
            .photos
            .first()
            .or_else(|| place.photos.first())
            .map(|photo| photo.photo_reference.clone());
        let photo_url = match (photo_reference, self.map_key()) {
            (Some(reference), Some(api_key)) => {
                photo_url(&reference, DETAIL_PHOTO_MAX_WIDTH, api_key)
            }
            _ => None,
        };

        Some(DetailPanel {
            name: details.name.unwrap_or_else(|| place.name.clone()),
            address: details.formatted_address.or_else(|| place.vicinity.clone()),
            category: category_label(&place.types),
            open_now: details
                .opening_hours
                .and_then(|hours| hours.open_now)
                .or_else(|| place.is_open_now()),
            rating: details.rating.or(place.rating),
            user_ratings_total: details.user_ratings_total.or(place.user_ratings_total),
            phone_number: details.formatted_phone_number,
            website: details.website,
            photo_url,
            details_loaded: selection.details.is_some(),
        })
    }

    pub fn map_overlay(&self) -> MapOverlay {
        let markers = match self.selection() {
            Some(selection) => vec![Marker {
                index: selection.index,
                title: selection.place.name.clone(),
                position: selection.place.geometry.location,
                highlighted: true,
            }],
            None => self
                .places()
                .iter()
                .enumerate()
                .map(|(index, place)| Marker {
                    index,
                    title: place.name.clone(),
                    position: place.geometry.location,
                    highlighted: self.hovered() == Some(index),
                })
                .collect(),
        };

        MapOverlay {
            settings: self.map_settings(),
            markers,
        }
    }
}
