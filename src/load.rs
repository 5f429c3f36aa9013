use crate::model::{CatalogItem, GalleryItem, Master};
use crate::source::{DataSource, LoadError};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

/// Identifies one list on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListId {
    Catalog(usize),
    Masters,
    Gallery,
}

/// A fetch to perform for `list`, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub list: ListId,
    pub generation: u64,
    pub source: String,
}

#[derive(Debug)]
pub enum Payload {
    Catalog(Result<Vec<CatalogItem>, LoadError>),
    Masters(Result<Vec<Master>, LoadError>),
    Gallery(Result<Vec<GalleryItem>, LoadError>),
}

/// A finished fetch, on its way back to the list that asked for it.
#[derive(Debug)]
pub struct LoadEvent {
    pub list: ListId,
    pub generation: u64,
    pub payload: Payload,
}

/// Fetch one list. Never fails: errors travel inside the payload.
pub async fn perform(source: &DataSource, request: LoadRequest) -> LoadEvent {
    debug!(list = ?request.list, generation = request.generation, source = %request.source, "load started");
    let payload = match request.list {
        ListId::Catalog(_) => Payload::Catalog(source.fetch_list(&request.source).await),
        ListId::Masters => Payload::Masters(source.fetch_list(&request.source).await),
        ListId::Gallery => Payload::Gallery(source.fetch_list(&request.source).await),
    };
    LoadEvent {
        list: request.list,
        generation: request.generation,
        payload,
    }
}

/// Run every request as its own task, reporting back over `tx`.
pub fn spawn_all(source: Arc<DataSource>, requests: Vec<LoadRequest>, tx: UnboundedSender<LoadEvent>) {
    for request in requests {
        let source = Arc::clone(&source);
        let tx = tx.clone();
        tokio::spawn(async move {
            let event = perform(&source, request).await;
            // The receiver is gone once the UI has quit.
            let _ = tx.send(event);
        });
    }
}
