//! Route document storage

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{de, Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

use crate::types::{Route, RouteSavings, StopStatus, TimeWindow};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("route document I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("route document is malformed: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("failed to serialize routes: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Where the route document lives
pub trait RouteStorage: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<Vec<StoredRoute>>, StorageError>;

    fn save(&self, routes: &[Route]) -> Result<(), StorageError>;
}

/// Route as read back from storage. Older documents may lack coordinates or
/// `originalOrder` on stops; those are backfilled when the route is opened.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRoute {
    pub id: String,
    pub technician_id: String,
    pub technician_name: String,
    pub technician_color: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub stops: Vec<StoredStop>,
    #[serde(default)]
    pub total_distance: f64,
    #[serde(default)]
    pub optimized_distance: f64,
    #[serde(default)]
    pub savings: RouteSavings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredStop {
    pub id: String,
    pub order: u32,
    #[serde(default)]
    pub original_order: Option<u32>,
    pub customer_id: String,
    pub customer_name: String,
    pub address: String,
    pub estimated_arrival: String,
    pub estimated_duration: u32,
    pub status: StopStatus,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default, deserialize_with = "window_tag")]
    pub time_window: Option<TimeWindow>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_priority: bool,
}

/// Stored tags include an explicit `"none"` alongside `null` and absence
fn window_tag<'de, D>(deserializer: D) -> Result<Option<TimeWindow>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref() {
        None | Some("none") => Ok(None),
        Some("morning") => Ok(Some(TimeWindow::Morning)),
        Some("afternoon") => Ok(Some(TimeWindow::Afternoon)),
        Some(other) => Err(de::Error::unknown_variant(
            other,
            &["morning", "afternoon", "none"],
        )),
    }
}

fn parse_document(raw: &str) -> Result<Vec<StoredRoute>, StorageError> {
    serde_json::from_str(raw).map_err(StorageError::Malformed)
}

fn render_document(routes: &[Route]) -> Result<String, StorageError> {
    serde_json::to_string_pretty(routes).map_err(StorageError::Serialize)
}

/// JSON file on disk. Writes go to a sibling temp file first and are then
/// renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RouteStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<StoredRoute>>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        parse_document(&raw).map(Some)
    }

    fn save(&self, routes: &[Route]) -> Result<(), StorageError> {
        let body = render_document(routes)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| self.io_error(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;

        debug!("Saved {} routes to {}", routes.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the document as a string in memory (tests, dry runs)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    document: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing (possibly malformed) document
    pub fn with_document(raw: impl Into<String>) -> Self {
        Self {
            document: Mutex::new(Some(raw.into())),
        }
    }

    pub fn document(&self) -> Option<String> {
        self.document.lock().clone()
    }
}

impl RouteStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<StoredRoute>>, StorageError> {
        match self.document.lock().as_deref() {
            Some(raw) => parse_document(raw).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, routes: &[Route]) -> Result<(), StorageError> {
        let body = render_document(routes)?;
        *self.document.lock() = Some(body);
        Ok(())
    }
}
