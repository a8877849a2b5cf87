use serde::{Deserialize, Serialize};

/// Nearby-search result as the view consumes it. The relay itself never
/// deserializes into this type, it forwards the provider JSON untouched.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub geometry: Geometry,
    #[serde(default)]
    pub vicinity: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub types: Vec<String>,
}

impl Place {
    pub fn is_open_now(&self) -> Option<bool> {
        self.opening_hours.as_ref().and_then(|hours| hours.open_now)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Montpellier city centre.
pub const DEFAULT_SEARCH_ORIGIN: Location = Location {
    lat: 43.6108,
    lng: 3.8767,
};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Photo {
    pub photo_reference: String,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub html_attributions: Vec<String>,
}

/// Fields requested from the details endpoint.
pub const DETAIL_FIELDS: [&str; 8] = [
    "name",
    "formatted_address",
    "opening_hours",
    "rating",
    "user_ratings_total",
    "formatted_phone_number",
    "website",
    "photos",
];

#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub photos: Vec<Photo>,
}
