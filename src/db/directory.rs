//! Customer and technician directory
//!
//! The directory is owned by the records side of the business; this crate only
//! reads it, plus caches coordinates derived for customers that had none.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::{Coordinates, Customer, Technician};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("failed to read directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed directory {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read access to customer and technician records
pub trait Directory: Send + Sync {
    fn customer(&self, customer_id: &str) -> Option<Customer>;

    fn customers(&self) -> Vec<Customer>;

    fn technician(&self, technician_id: &str) -> Option<Technician>;

    fn technicians(&self) -> Vec<Technician>;

    /// Remember coordinates derived for a customer so they are not derived again
    fn store_coordinates(&self, customer_id: &str, coordinates: Coordinates);
}

/// On-disk layout of the directory document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryDocument {
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub technicians: Vec<Technician>,
}

/// Directory held in memory, optionally loaded from a JSON file
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: RwLock<Vec<Customer>>,
    technicians: Vec<Technician>,
}

impl InMemoryDirectory {
    pub fn new(customers: Vec<Customer>, technicians: Vec<Technician>) -> Self {
        Self {
            customers: RwLock::new(customers),
            technicians,
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: DirectoryDocument =
            serde_json::from_str(&raw).map_err(|source| DirectoryError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Loaded directory {}: {} customers, {} technicians",
            path.display(),
            document.customers.len(),
            document.technicians.len()
        );

        Ok(Self::new(document.customers, document.technicians))
    }
}

impl Directory for InMemoryDirectory {
    fn customer(&self, customer_id: &str) -> Option<Customer> {
        self.customers.read().iter().find(|c| c.id == customer_id).cloned()
    }

    fn customers(&self) -> Vec<Customer> {
        self.customers.read().clone()
    }

    fn technician(&self, technician_id: &str) -> Option<Technician> {
        self.technicians.iter().find(|t| t.id == technician_id).cloned()
    }

    fn technicians(&self) -> Vec<Technician> {
        self.technicians.clone()
    }

    fn store_coordinates(&self, customer_id: &str, coordinates: Coordinates) {
        let mut customers = self.customers.write();
        if let Some(customer) = customers.iter_mut().find(|c| c.id == customer_id) {
            customer.lat = Some(coordinates.lat);
            customer.lng = Some(coordinates.lng);
        }
    }
}
