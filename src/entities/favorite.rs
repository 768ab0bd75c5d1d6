// ⭐ Favorite Entity - market-watch listing
// A listing the user bookmarked while looking for the next property.

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// FAVORITE STATUS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteStatus {
    Nieuw,
    Bekeken,
    Geanalyseerd,
    Afgekeurd,
    InOverweging,
}

const STATUS_NAMES: &[&str] = &["nieuw", "bekeken", "geanalyseerd", "afgekeurd", "in_overweging"];

impl FavoriteStatus {
    /// Blank means a freshly saved listing; unknown names give None
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "nieuw" => Some(FavoriteStatus::Nieuw),
            "bekeken" => Some(FavoriteStatus::Bekeken),
            "geanalyseerd" => Some(FavoriteStatus::Geanalyseerd),
            "afgekeurd" => Some(FavoriteStatus::Afgekeurd),
            "in_overweging" => Some(FavoriteStatus::InOverweging),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FavoriteStatus::Nieuw => "nieuw",
            FavoriteStatus::Bekeken => "bekeken",
            FavoriteStatus::Geanalyseerd => "geanalyseerd",
            FavoriteStatus::Afgekeurd => "afgekeurd",
            FavoriteStatus::InOverweging => "in_overweging",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            FavoriteStatus::Nieuw => "New",
            FavoriteStatus::Bekeken => "Viewed",
            FavoriteStatus::Geanalyseerd => "Analysed",
            FavoriteStatus::Afgekeurd => "Rejected",
            FavoriteStatus::InOverweging => "Under consideration",
        }
    }
}

impl Default for FavoriteStatus {
    fn default() -> Self {
        FavoriteStatus::Nieuw
    }
}

impl<'de> Deserialize<'de> for FavoriteStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        FavoriteStatus::parse(&raw).ok_or_else(|| de::Error::unknown_variant(&raw, STATUS_NAMES))
    }
}

// ============================================================================
// FAVORITE ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,

    /// Listing URL
    pub link: String,

    #[serde(default)]
    pub location: Option<String>,

    /// Asking price in EUR
    #[serde(default)]
    pub price: Option<f64>,

    /// Living area in m²
    #[serde(default)]
    pub area_m2: Option<f64>,

    #[serde(default)]
    pub status: FavoriteStatus,

    #[serde(default)]
    pub archived: bool,

    pub created_at: DateTime<Utc>,
}

impl Favorite {
    pub fn new(link: String, created_at: DateTime<Utc>) -> Self {
        Favorite {
            id: uuid::Uuid::new_v4().to_string(),
            link,
            location: None,
            price: None,
            area_m2: None,
            status: FavoriteStatus::Nieuw,
            archived: false,
            created_at,
        }
    }
}

/// Non-archived favorites, newest first
pub fn active_favorites(favorites: &[Favorite]) -> Vec<&Favorite> {
    let mut active: Vec<&Favorite> = favorites.iter().filter(|f| !f.archived).collect();
    active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    active
}

/// Count non-archived favorites per status
pub fn count_by_status(favorites: &[Favorite]) -> BTreeMap<FavoriteStatus, usize> {
    let mut counts = BTreeMap::new();
    for favorite in favorites.iter().filter(|f| !f.archived) {
        *counts.entry(favorite.status).or_insert(0) += 1;
    }
    counts
}
