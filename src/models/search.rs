use serde::{Deserialize, Serialize};

/// Radii offered by the search form.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(into = "u32", try_from = "u32")]
pub enum SearchRadius {
    #[default]
    FiveKm,
    TenKm,
    TwentyKm,
    ThirtyKm,
}

impl SearchRadius {
    pub const ALL: [SearchRadius; 4] = [
        SearchRadius::FiveKm,
        SearchRadius::TenKm,
        SearchRadius::TwentyKm,
        SearchRadius::ThirtyKm,
    ];

    pub fn meters(self) -> u32 {
        match self {
            SearchRadius::FiveKm => 5_000,
            SearchRadius::TenKm => 10_000,
            SearchRadius::TwentyKm => 20_000,
            SearchRadius::ThirtyKm => 30_000,
        }
    }
}

impl From<SearchRadius> for u32 {
    fn from(radius: SearchRadius) -> Self {
        radius.meters()
    }
}

impl TryFrom<u32> for SearchRadius {
    type Error = String;

    fn try_from(meters: u32) -> Result<Self, Self::Error> {
        SearchRadius::ALL
            .into_iter()
            .find(|radius| radius.meters() == meters)
            .ok_or_else(|| format!("{} is not one of the supported search radii", meters))
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SearchCriteria {
    pub activity: String,
    pub radius: SearchRadius,
}

impl SearchCriteria {
    pub fn new(activity: impl Into<String>, radius: SearchRadius) -> Self {
        Self {
            activity: activity.into(),
            radius,
        }
    }

    /// Trimmed keyword, `None` when there is nothing to search for.
    pub fn keyword(&self) -> Option<&str> {
        Some(self.activity.trim()).filter(|activity| !activity.is_empty())
    }
}
