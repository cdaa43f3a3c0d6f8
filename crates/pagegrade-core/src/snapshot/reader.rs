use super::types::PageSnapshot;
use crate::{Error, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub struct SnapshotReader;

impl SnapshotReader {
    /// Read and parse a page snapshot from the given path
    pub fn from_file(path: &Path) -> Result<PageSnapshot> {
        tracing::debug!("Reading snapshot file from: {}", path.display());

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let snapshot: PageSnapshot = serde_json::from_reader(reader)?;

        tracing::info!(
            "Loaded snapshot with {} resources",
            snapshot.resources.len()
        );

        Ok(snapshot)
    }

    /// Parse a page snapshot from a JSON string
    pub fn from_str(content: &str) -> Result<PageSnapshot> {
        tracing::debug!("Parsing snapshot from string");

        let snapshot: PageSnapshot = serde_json::from_str(content)?;

        Ok(snapshot)
    }

    /// Check the parts of a snapshot that serde cannot
    pub fn validate(snapshot: &PageSnapshot) -> Result<()> {
        tracing::debug!("Validating snapshot structure");

        for (idx, resource) in snapshot.resources.iter().enumerate() {
            if resource.name.is_empty() {
                return Err(Error::InvalidSnapshot(format!(
                    "Resource {} has an empty name",
                    idx
                )));
            }
        }

        Ok(())
    }
}
