use serde::{Deserialize, Serialize};

/// An inclusive `{min, max}` pair, used for player counts and play time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }
}

/// One entry of a catalog file (board games, RPGs, wargames).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub players: Option<Range>,
    #[serde(default)]
    pub time: Option<Range>,
}

/// An event host from `masters.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Master {
    pub name: String,
    pub image: String,
    pub systems: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A photo from `gallery.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub image: String,
    #[serde(default)]
    pub alt: Option<String>,
}
