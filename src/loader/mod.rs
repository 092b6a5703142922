//! Dataset loading.
//!
//! This module fetches the raw CSV document from a local path or an HTTP(S)
//! URL and runs it through the parser. A load either yields the complete
//! dataset or fails; there is no retry and no partial result.

use crate::error::{LoadError, LoadResult};
use crate::models::Dataset;
use crate::parser::parse_document;
use indicatif::{ProgressBar, ProgressStyle};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Where the raw document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// A file on the local filesystem.
    File(PathBuf),
    /// An `http://` or `https://` URL.
    Url(String),
}

impl DataSource {
    /// Interpret a location string: URLs by scheme, everything else as a path.
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Options for loading a dataset.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Request timeout for URL sources.
    pub timeout: Duration,
    /// Whether to show a spinner while fetching.
    pub show_progress: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            show_progress: false,
        }
    }
}

/// Fetches and parses the innovation dataset.
pub struct Loader {
    source: DataSource,
    options: LoadOptions,
}

impl Loader {
    /// Create a loader for a source.
    pub fn new(source: DataSource, options: LoadOptions) -> Self {
        Self { source, options }
    }

    /// The configured source.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch the document once, then tokenize and build records.
    pub async fn load(&self) -> LoadResult<Dataset> {
        info!("Loading innovation data from: {}", self.source);

        let text = self.fetch().await?;
        debug!("Fetched {} bytes", text.len());

        let dataset = parse_document(&text)?;

        if dataset.skipped_rows > 0 {
            debug!("Skipped {} incomplete rows", dataset.skipped_rows);
        }
        info!(
            "Loaded {} innovations across {} categories",
            dataset.records.len(),
            dataset.categories.len()
        );

        Ok(dataset)
    }

    /// Retrieve the raw document text.
    async fn fetch(&self) -> LoadResult<String> {
        let spinner = self.options.show_progress.then(|| {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            pb.set_message(format!("Fetching {}", self.source));
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        });

        let result = match &self.source {
            DataSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|e| LoadError::fetch(self.source.to_string(), e)),
            DataSource::Url(url) => self.fetch_url(url).await,
        };

        if let Some(pb) = spinner {
            match &result {
                Ok(_) => pb.finish_with_message("Fetch complete"),
                Err(_) => pb.abandon_with_message("Fetch failed"),
            }
        }

        result
    }

    async fn fetch_url(&self, url: &str) -> LoadResult<String> {
        let client = reqwest::Client::builder()
            .timeout(self.options.timeout)
            .build()
            .map_err(|e| LoadError::fetch(url, e))?;

        let response = client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                LoadError::fetch(
                    url,
                    format!("request timed out after {}s", self.options.timeout.as_secs()),
                )
            } else if e.is_connect() {
                LoadError::fetch(url, "cannot connect to host")
            } else {
                LoadError::fetch(url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Dataset request returned HTTP {}", status);
            return Err(LoadError::fetch(url, format!("HTTP status {}", status)));
        }

        response.text().await.map_err(|e| LoadError::fetch(url, e))
    }
}

/// Load a dataset with default options.
pub async fn load(source: DataSource) -> LoadResult<Dataset> {
    Loader::new(source, LoadOptions::default()).load().await
}
