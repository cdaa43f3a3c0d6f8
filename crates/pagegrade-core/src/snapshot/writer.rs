use super::types::PageSnapshot;
use crate::Result;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub struct SnapshotWriter;

impl SnapshotWriter {
    /// Write a snapshot to a file as pretty-printed JSON
    pub fn to_file(snapshot: &PageSnapshot, path: &Path) -> Result<()> {
        tracing::debug!("Writing snapshot file to: {}", path.display());

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, snapshot)?;

        tracing::info!(
            "Wrote snapshot with {} resources to {}",
            snapshot.resources.len(),
            path.display()
        );

        Ok(())
    }

    pub fn to_string(snapshot: &PageSnapshot) -> Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }
}
