use crate::config::{CatalogConfig, Locale, SiteConfig, WindowConfig};
use crate::load::{ListId, LoadEvent, LoadRequest, Payload};
use crate::model::{CatalogItem, GalleryItem, Master};
use crate::renderer::{ListRenderer, LoadOutcome, LoadState, Presentation};
use crate::sample::sample_size;
use rand::Rng;
use tracing::info;

/// Which paged list a navigation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowId {
    Masters,
    Gallery,
}

impl WindowId {
    pub fn toggle(self) -> Self {
        match self {
            Self::Masters => Self::Gallery,
            Self::Gallery => Self::Masters,
        }
    }
}

/// A catalog list together with its configuration.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub config: CatalogConfig,
    pub list: ListRenderer<CatalogItem>,
}

/// All lists on the page.
#[derive(Debug, Clone)]
pub struct Site {
    pub catalogs: Vec<Catalog>,
    pub masters: ListRenderer<Master>,
    pub gallery: ListRenderer<GalleryItem>,
    pub masters_config: WindowConfig,
    pub gallery_config: WindowConfig,
    pub locale: Locale,
}

impl Site {
    pub fn new(config: &SiteConfig) -> Self {
        let catalogs = config
            .catalogs
            .iter()
            .map(|c| Catalog {
                config: c.clone(),
                list: ListRenderer::new(
                    c.mount.clone(),
                    Presentation::Sampled {
                        limit: sample_size(c.count),
                    },
                ),
            })
            .collect();
        Self {
            catalogs,
            masters: ListRenderer::new(
                config.masters.mount.clone(),
                Presentation::Windowed {
                    visible: config.masters.visible,
                },
            ),
            gallery: ListRenderer::new(
                config.gallery.mount.clone(),
                Presentation::Windowed {
                    visible: config.gallery.visible,
                },
            ),
            masters_config: config.masters.clone(),
            gallery_config: config.gallery.clone(),
            locale: config.locale.clone(),
        }
    }

    /// Start loading every list; previous in-flight loads become stale.
    pub fn begin_reload(&mut self) -> Vec<LoadRequest> {
        let mut requests = Vec::with_capacity(self.catalogs.len() + 2);
        for (i, catalog) in self.catalogs.iter_mut().enumerate() {
            requests.push(LoadRequest {
                list: ListId::Catalog(i),
                generation: catalog.list.begin_load(),
                source: catalog.config.source.clone(),
            });
        }
        requests.push(LoadRequest {
            list: ListId::Masters,
            generation: self.masters.begin_load(),
            source: self.masters_config.source.clone(),
        });
        requests.push(LoadRequest {
            list: ListId::Gallery,
            generation: self.gallery.begin_load(),
            source: self.gallery_config.source.clone(),
        });
        requests
    }

    /// Route a finished load to its list.
    pub fn apply<R: Rng>(&mut self, event: LoadEvent, rng: &mut R) -> LoadOutcome {
        let LoadEvent {
            list,
            generation,
            payload,
        } = event;
        let outcome = match (list, payload) {
            (ListId::Catalog(i), Payload::Catalog(result)) => match self.catalogs.get_mut(i) {
                Some(catalog) => catalog.list.finish_load(generation, result, rng),
                None => LoadOutcome::Stale,
            },
            (ListId::Masters, Payload::Masters(result)) => {
                self.masters.finish_load(generation, result, rng)
            }
            (ListId::Gallery, Payload::Gallery(result)) => {
                self.gallery.finish_load(generation, result, rng)
            }
            _ => LoadOutcome::Stale,
        };
        if let LoadOutcome::Applied { items } = outcome {
            info!(list = ?list, items, "list loaded");
        }
        outcome
    }

    pub fn prev(&mut self, window: WindowId) -> bool {
        match window {
            WindowId::Masters => self.masters.prev(),
            WindowId::Gallery => self.gallery.prev(),
        }
    }

    pub fn next(&mut self, window: WindowId) -> bool {
        match window {
            WindowId::Masters => self.masters.next(),
            WindowId::Gallery => self.gallery.next(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.states().any(|s| *s == LoadState::Loading)
    }

    /// Messages of every list whose last load failed.
    pub fn failures(&self) -> Vec<String> {
        self.states()
            .filter_map(|s| match s {
                LoadState::Failed(msg) => Some(msg.clone()),
                _ => None,
            })
            .collect()
    }

    fn states(&self) -> impl Iterator<Item = &LoadState> {
        self.catalogs
            .iter()
            .map(|c| c.list.state())
            .chain([self.masters.state(), self.gallery.state()])
    }
}
