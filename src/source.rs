use reqwest::Url;
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Everything that can go wrong fetching one list.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid location {location}: {reason}")]
    InvalidLocation { location: String, reason: String },

    #[error("HTTP request for {location} failed: {source}")]
    Http {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{location} answered HTTP {status}")]
    Status { location: String, status: u16 },

    #[error("Could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{location} is not a valid list: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Short line for the status bar.
    pub fn user_message(&self) -> String {
        match self {
            LoadError::InvalidLocation { location, .. } => format!("Bad location: {}", location),
            LoadError::Http { location, .. } => format!("Network error loading {}", location),
            LoadError::Status { location, status } => format!("{} returned {}", location, status),
            LoadError::Io { path, .. } => format!("Missing file: {}", path.display()),
            LoadError::Parse { location, .. } => format!("Broken data in {}", location),
        }
    }
}

/// Where relative data locations are resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteRoot {
    Remote(Url),
    Local(PathBuf),
}

impl SiteRoot {
    /// `http(s)://` values become a base URL, anything else a directory.
    pub fn parse(root: &str) -> Result<Self, LoadError> {
        if is_remote(root) {
            // A base without a trailing slash would drop its last segment on join.
            let with_slash = if root.ends_with('/') {
                root.to_string()
            } else {
                format!("{}/", root)
            };
            let url = Url::parse(&with_slash).map_err(|e| invalid(root, e))?;
            Ok(SiteRoot::Remote(url))
        } else {
            Ok(SiteRoot::Local(PathBuf::from(root)))
        }
    }
}

/// A resolved location, ready to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Url(Url),
    File(PathBuf),
}

fn invalid(location: &str, reason: impl ToString) -> LoadError {
    LoadError::InvalidLocation {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetches JSON arrays relative to a site root.
#[derive(Debug, Clone)]
pub struct DataSource {
    client: reqwest::Client,
    root: SiteRoot,
}

impl DataSource {
    pub fn new(root: SiteRoot) -> Self {
        Self {
            client: reqwest::Client::new(),
            root,
        }
    }

    pub fn resolve(&self, location: &str) -> Result<Resolved, LoadError> {
        if is_remote(location) {
            return Url::parse(location)
                .map(Resolved::Url)
                .map_err(|e| invalid(location, e));
        }
        match &self.root {
            SiteRoot::Remote(base) => base
                .join(location)
                .map(Resolved::Url)
                .map_err(|e| invalid(location, e)),
            SiteRoot::Local(dir) => Ok(Resolved::File(dir.join(location))),
        }
    }

    /// Fetch `location` and parse it as a JSON array of `T`.
    pub async fn fetch_list<T: DeserializeOwned>(&self, location: &str) -> Result<Vec<T>, LoadError> {
        let body = match self.resolve(location)? {
            Resolved::Url(url) => {
                debug!(%url, "fetching list");
                let http = |source| LoadError::Http {
                    location: location.to_string(),
                    source,
                };
                let response = self.client.get(url).send().await.map_err(http)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        location: location.to_string(),
                        status: status.as_u16(),
                    });
                }
                response.bytes().await.map_err(http)?.to_vec()
            }
            Resolved::File(path) => {
                debug!(path = %path.display(), "reading list");
                tokio::fs::read(&path)
                    .await
                    .map_err(|source| LoadError::Io { path, source })?
            }
        };
        parse_list(location, &body)
    }
}

pub fn parse_list<T: DeserializeOwned>(location: &str, body: &[u8]) -> Result<Vec<T>, LoadError> {
    serde_json::from_slice(body).map_err(|source| LoadError::Parse {
        location: location.to_string(),
        source,
    })
}
