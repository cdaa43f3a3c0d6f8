use crate::Result;
use std::path::Path;
use tempfile::TempDir;

/// Throwaway Chrome user-data directory, removed on drop
///
/// Every run starts from an empty profile so cached resources from an
/// earlier visit cannot shrink the transfer sizes.
pub struct ProfileDir {
    dir: TempDir,
}

impl ProfileDir {
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("pagegrade-profile-")
            .tempdir()?;

        tracing::debug!("Created Chrome profile at {}", dir.path().display());

        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
