use crate::pager::{Controls, PaginationCursor};
use crate::sample::sample;
use crate::source::LoadError;
use rand::Rng;
use tracing::{debug, warn};

/// How a list turns its dataset into the set of items on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Random sample of `limit` items per load, or everything in order.
    Sampled { limit: Option<usize> },
    /// Fixed-size window moved with prev/next.
    Windowed { visible: usize },
}

/// Load progress of a single list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// What happened to a completed load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { items: usize },
    /// A newer load was started after this one; the result was dropped.
    Stale,
    Failed,
}

/// Owned state of one rendered list: its dataset, what is shown, and the
/// generation of the most recent load request.
#[derive(Debug, Clone)]
pub struct ListRenderer<T> {
    mount: String,
    presentation: Presentation,
    dataset: Vec<T>,
    sampled: Vec<T>,
    cursor: PaginationCursor,
    generation: u64,
    state: LoadState,
}

impl<T: Clone> ListRenderer<T> {
    pub fn new(mount: impl Into<String>, presentation: Presentation) -> Self {
        let visible = match presentation {
            Presentation::Windowed { visible } => visible,
            Presentation::Sampled { .. } => 1,
        };
        Self {
            mount: mount.into(),
            presentation,
            dataset: Vec::new(),
            sampled: Vec::new(),
            cursor: PaginationCursor::new(visible),
            generation: 0,
            state: LoadState::Idle,
        }
    }

    pub fn mount(&self) -> &str {
        &self.mount
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn dataset(&self) -> &[T] {
        &self.dataset
    }

    pub fn cursor(&self) -> &PaginationCursor {
        &self.cursor
    }

    pub fn is_windowed(&self) -> bool {
        matches!(self.presentation, Presentation::Windowed { .. })
    }

    /// Start a new load and return its generation token.
    ///
    /// Any load still in flight becomes stale.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.state = LoadState::Loading;
        self.generation
    }

    /// Apply a finished load. On success the dataset is replaced and the
    /// cursor goes back to the first window; on failure whatever was shown
    /// before stays.
    pub fn finish_load<R: Rng>(
        &mut self,
        generation: u64,
        result: Result<Vec<T>, LoadError>,
        rng: &mut R,
    ) -> LoadOutcome {
        if generation != self.generation {
            debug!(mount = %self.mount, generation, current = self.generation, "dropping stale load");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(items) => {
                if let Presentation::Sampled { limit } = self.presentation {
                    self.sampled = sample(&items, limit, rng);
                }
                self.cursor.reset(items.len());
                self.dataset = items;
                self.state = LoadState::Ready;
                LoadOutcome::Applied {
                    items: self.dataset.len(),
                }
            }
            Err(err) => {
                warn!(mount = %self.mount, error = %err, "list failed to load");
                self.state = LoadState::Failed(err.user_message());
                LoadOutcome::Failed
            }
        }
    }

    /// The items currently on screen.
    pub fn view_set(&self) -> &[T] {
        match self.presentation {
            Presentation::Sampled { .. } => &self.sampled,
            Presentation::Windowed { .. } => &self.dataset[self.cursor.window()],
        }
    }

    /// Controls for windowed lists; sampled lists never show any.
    pub fn controls(&self) -> Controls {
        match self.presentation {
            Presentation::Sampled { .. } => Controls::Hidden,
            Presentation::Windowed { .. } => self.cursor.controls(),
        }
    }

    pub fn prev(&mut self) -> bool {
        self.is_windowed() && self.cursor.prev()
    }

    pub fn next(&mut self) -> bool {
        self.is_windowed() && self.cursor.next()
    }

    pub fn seek(&mut self, index: usize) {
        if self.is_windowed() {
            self.cursor.seek(index);
        }
    }
}
