//! View models: plain data describing what each rendered node shows.
//!
//! Both the HTML page and the terminal browser are built from these, so all
//! the fallback and formatting rules live here once.

use crate::config::Locale;
use crate::format::{format_players, format_time, join_systems, tag_badges};
use crate::model::{CatalogItem, GalleryItem, Master};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    pub image: Option<String>,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub players: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterCard {
    pub image: String,
    pub name: String,
    pub systems: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    pub image: String,
    pub alt: String,
}

/// Builds the view node for one item.
pub trait ToView {
    type View;

    fn to_view(&self, locale: &Locale) -> Self::View;
}

impl ToView for CatalogItem {
    type View = CatalogCard;

    fn to_view(&self, locale: &Locale) -> CatalogCard {
        CatalogCard {
            image: self.image.clone().filter(|s| !s.is_empty()),
            title: self.title.clone(),
            description: self.description.clone(),
            tags: tag_badges(self.tags.as_deref()),
            players: format_players(self.players.as_ref()),
            time: format_time(self.time.as_ref(), &locale.minutes),
        }
    }
}

impl ToView for Master {
    type View = MasterCard;

    fn to_view(&self, _locale: &Locale) -> MasterCard {
        MasterCard {
            image: self.image.clone(),
            name: self.name.clone(),
            systems: join_systems(&self.systems),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

impl ToView for GalleryItem {
    type View = GalleryImage;

    fn to_view(&self, locale: &Locale) -> GalleryImage {
        let alt = match self.alt.as_deref() {
            Some(alt) if !alt.is_empty() => alt.to_string(),
            _ => locale.gallery_alt.clone(),
        };
        GalleryImage {
            image: self.image.clone(),
            alt,
        }
    }
}

pub fn views<'a, T, I>(items: I, locale: &Locale) -> Vec<T::View>
where
    T: ToView + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items.into_iter().map(|item| item.to_view(locale)).collect()
}
