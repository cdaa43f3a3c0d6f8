use crate::snapshot::ResourceRecord;
use crate::{Error, Result};
use std::collections::HashMap;
use url::Url;

/// Per-type, per-domain and per-file totals over a resource list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    pub content_size_by_type: HashMap<String, u64>,
    pub content_size_by_domain: HashMap<String, u64>,
    pub requests_by_type: HashMap<String, usize>,
    pub requests_by_domain: HashMap<String, usize>,
    /// Size of the last record seen for each URL
    pub requests_by_file: HashMap<String, u64>,
}

impl Breakdown {
    /// Fold the resources into fresh maps
    ///
    /// Fails on the first record whose name is not a valid URL; nothing is
    /// returned for the records before it.
    pub fn from_resources(resources: &[ResourceRecord]) -> Result<Self> {
        resources
            .iter()
            .try_fold(Self::default(), |acc, resource| acc.with_resource(resource))
    }

    fn with_resource(mut self, resource: &ResourceRecord) -> Result<Self> {
        let domain = host_of(&resource.name)?;
        let size = resource.transfer_size;

        add_bytes(
            &mut self.content_size_by_type,
            &resource.initiator_type,
            size,
            &resource.name,
        )?;
        add_bytes(&mut self.content_size_by_domain, &domain, size, &resource.name)?;
        *self
            .requests_by_type
            .entry(resource.initiator_type.clone())
            .or_insert(0) += 1;
        *self.requests_by_domain.entry(domain).or_insert(0) += 1;

        // Duplicate URLs overwrite: the last observation wins.
        self.requests_by_file.insert(resource.name.clone(), size);

        Ok(self)
    }
}

fn add_bytes(map: &mut HashMap<String, u64>, key: &str, size: u64, url: &str) -> Result<()> {
    let total = map.entry(key.to_string()).or_insert(0);
    *total = total.checked_add(size).ok_or_else(|| Error::SizeOverflow {
        url: url.to_string(),
    })?;
    Ok(())
}

/// Hostname used as the domain grouping key
///
/// URLs without a host (`data:`, `about:blank`, `blob:`) map to the empty
/// string, matching what a browser reports for `URL.hostname`.
pub fn host_of(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|source| Error::MalformedResourceUrl {
        url: url.to_string(),
        source,
    })?;

    Ok(parsed.host_str().unwrap_or_default().to_string())
}
