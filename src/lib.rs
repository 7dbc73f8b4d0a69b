use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub mod error;
pub mod resource;

pub use error::GraphError;
pub use resource::Resource;

pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v19.0";
pub const DEFAULT_PAGE_ID: &str = "thewellreading";
pub const DEFAULT_DATA_DIR: &str = "_data";
pub const USER_AGENT: &str = "TheWellChurch/1.0";

/// Fixed page size; only the first page of each resource is mirrored.
pub const PAGE_LIMIT: u32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub page_id: String,
    pub access_token: String,
    pub graph_url: String,
    pub data_dir: PathBuf,
}

impl SyncConfig {
    pub fn new(page_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            page_id: page_id.into(),
            access_token: access_token.into(),
            graph_url: DEFAULT_GRAPH_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }

    pub fn with_graph_url(mut self, graph_url: impl Into<String>) -> Self {
        self.graph_url = graph_url.into();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn output_path(&self, resource: Resource) -> PathBuf {
        self.data_dir.join(resource.file_name())
    }
}

/// Envelope of a Graph API edge listing. `paging` and friends are ignored.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GraphResponse {
    #[serde(default)]
    pub data: Vec<Value>,
}

/// Outcome of mirroring one resource. `error` is set when the fetch failed
/// and an empty list was written in its place.
#[derive(Debug)]
pub struct SyncReport {
    pub resource: Resource,
    pub path: PathBuf,
    pub count: usize,
    pub error: Option<GraphError>,
}

pub struct GraphClient {
    client: Client,
    config: SyncConfig,
}

impl GraphClient {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: SyncConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn request_url(&self, resource: Resource) -> Result<Url, GraphError> {
        let request = self.build_request(resource)?;
        Ok(request.url().clone())
    }

    fn build_request(&self, resource: Resource) -> Result<reqwest::Request, GraphError> {
        let url = format!(
            "{}/{}/{}",
            self.config.graph_url.trim_end_matches('/'),
            self.config.page_id,
            resource.endpoint()
        );
        let limit = PAGE_LIMIT.to_string();

        let request = self
            .client
            .get(url)
            .query(&[
                ("fields", resource.fields()),
                ("limit", limit.as_str()),
                ("access_token", self.config.access_token.as_str()),
            ])
            .build()?;
        Ok(request)
    }

    /// Performs a single GET for `resource` and returns its `data` list.
    pub async fn fetch(&self, resource: Resource) -> Result<Vec<Value>, GraphError> {
        let request = self.build_request(resource)?;
        debug!(resource = %resource, url = %redact_token(request.url().as_str()), "Fetching");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GraphError::from_status(status));
        }

        let text = response.text().await?;
        parse_graph_response(&text)
    }

    /// Fetches `resource` and writes it to its file under the data directory.
    ///
    /// A failed fetch is not an error here: an empty list is written and the
    /// failure is carried in [`SyncReport::error`]. Only local I/O errors
    /// are returned as `Err`.
    pub async fn sync(&self, resource: Resource) -> Result<SyncReport> {
        let (records, error) = match self.fetch(resource).await {
            Ok(records) => (records, None),
            Err(err) => {
                debug!(resource = %resource, error = %err, "Fetch failed, writing empty list");
                (Vec::new(), Some(err))
            }
        };

        let path = self.config.output_path(resource);
        let count = save_records(&path, &records)?;
        info!(resource = %resource, count, path = %path.display(), "Saved");

        Ok(SyncReport {
            resource,
            path,
            count,
            error,
        })
    }

    /// Syncs posts, videos and events in order. Each entry is independent of the others.
    pub async fn sync_all(&self) -> Vec<Result<SyncReport>> {
        let mut reports = Vec::with_capacity(Resource::ALL.len());
        for resource in Resource::ALL {
            reports.push(self.sync(resource).await);
        }
        reports
    }
}

pub fn parse_graph_response(text: &str) -> Result<Vec<Value>, GraphError> {
    let parsed: GraphResponse = serde_json::from_str(text)?;
    Ok(parsed.data)
}

/// Writes `records` as 2-space indented JSON, creating parent directories.
pub fn save_records(path: &Path, records: &[Value]) -> Result<usize> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;

    Ok(records.len())
}

/// Replaces the value of the `access_token` query parameter so URLs can be logged.
pub fn redact_token(url: &str) -> String {
    const KEY: &str = "access_token=";

    let Some(start) = url.find(KEY) else {
        return url.to_string();
    };
    let value_start = start + KEY.len();
    let value_end = url[value_start..]
        .find('&')
        .map(|i| value_start + i)
        .unwrap_or(url.len());

    format!("{}REDACTED{}", &url[..value_start], &url[value_end..])
}
