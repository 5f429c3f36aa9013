use crate::load::{self, LoadEvent};
use crate::renderer::LoadOutcome;
use crate::site::{Site, WindowId};
use crate::source::DataSource;
use chrono::{DateTime, Local};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Main application state for the terminal browser.
pub struct App {
    pub site: Site,
    pub should_quit: bool,
    pub show_help: bool,

    /// Paged panel that receives prev/next.
    pub focus: WindowId,

    // Load plumbing
    source: Arc<DataSource>,
    events_tx: UnboundedSender<LoadEvent>,
    events_rx: UnboundedReceiver<LoadEvent>,
    rng: StdRng,
    pub loaded_at: Option<DateTime<Local>>,

    // Status message
    pub status_msg: String,
}

impl App {
    pub fn new(site: Site, source: DataSource) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            site,
            should_quit: false,
            show_help: false,
            focus: WindowId::Masters,
            source: Arc::new(source),
            events_tx,
            events_rx,
            rng: StdRng::from_entropy(),
            loaded_at: None,
            status_msg: "Loading lists...".to_string(),
        }
    }

    /// Kick off a load of every list. Results arrive through [`App::drain_events`].
    pub fn reload(&mut self) {
        let requests = self.site.begin_reload();
        self.status_msg = format!("Loading {} lists...", requests.len());
        load::spawn_all(Arc::clone(&self.source), requests, self.events_tx.clone());
    }

    /// Apply every load that has finished since the last call.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    pub fn apply(&mut self, event: LoadEvent) -> LoadOutcome {
        let outcome = self.site.apply(event, &mut self.rng);
        if outcome != LoadOutcome::Stale {
            self.refresh_status();
        }
        outcome
    }

    fn refresh_status(&mut self) {
        if self.site.is_loading() {
            return;
        }
        let failures = self.site.failures();
        if failures.is_empty() {
            let now = Local::now();
            self.loaded_at = Some(now);
            self.status_msg = format!("All lists loaded at {}", now.format("%H:%M:%S"));
        } else {
            self.status_msg = failures.join("; ");
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn prev(&mut self) -> bool {
        self.site.prev(self.focus)
    }

    pub fn next(&mut self) -> bool {
        self.site.next(self.focus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::load::{ListId, Payload};
    use crate::model::Master;
    use crate::source::SiteRoot;
    use std::path::PathBuf;

    fn app() -> App {
        let config = SiteConfig::default();
        App::new(
            Site::new(&config),
            DataSource::new(SiteRoot::Local(PathBuf::from("."))),
        )
    }

    fn masters(n: usize) -> Vec<Master> {
        (0..n)
            .map(|i| Master {
                name: format!("M{}", i),
                image: String::new(),
                systems: Vec::new(),
                description: None,
            })
            .collect()
    }

    #[test]
    fn test_navigation_follows_focus() {
        let mut app = app();
        let requests = app.site.begin_reload();
        let event = LoadEvent {
            list: ListId::Masters,
            generation: requests[3].generation,
            payload: Payload::Masters(Ok(masters(7))),
        };
        app.apply(event);

        assert!(app.next());
        assert_eq!(app.site.masters.cursor().index(), 1);
        app.toggle_focus();
        assert_eq!(app.focus, WindowId::Gallery);
        assert!(!app.next());
        app.toggle_focus();
        assert!(app.prev());
        assert!(!app.prev());
    }

    #[test]
    fn test_stale_event_does_not_change_status() {
        let mut app = app();
        let first = app.site.begin_reload();
        let _second = app.site.begin_reload();
        app.status_msg = "waiting".to_string();
        let outcome = app.apply(LoadEvent {
            list: ListId::Masters,
            generation: first[3].generation,
            payload: Payload::Masters(Ok(masters(2))),
        });
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(app.status_msg, "waiting");
        assert!(app.site.masters.dataset().is_empty());
    }

    #[tokio::test]
    async fn test_reload_and_drain_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.catalogs.clear();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(
            dir.path().join("data/masters.json"),
            r#"[{"name":"A","image":"a.jpg","systems":["Fate"]}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("data/gallery.json"), r#"[{"image":"g.jpg"}]"#).unwrap();

        let mut app = App::new(
            Site::new(&config),
            DataSource::new(SiteRoot::Local(dir.path().to_path_buf())),
        );
        app.reload();
        for _ in 0..100 {
            app.drain_events();
            if !app.site.is_loading() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(!app.site.is_loading());
        assert_eq!(app.site.masters.dataset().len(), 1);
        assert_eq!(app.site.gallery.dataset().len(), 1);
        assert!(app.status_msg.starts_with("All lists loaded"));
        assert!(app.loaded_at.is_some());
    }
}
