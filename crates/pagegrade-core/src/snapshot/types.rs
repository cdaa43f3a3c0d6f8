use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single resource-timing entry as reported by the page
///
/// Field names follow the browser's `PerformanceResourceTiming` so that a
/// projection of `performance.getEntriesByType('resource')` deserializes
/// as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRecord {
    /// Absolute URL of the resource
    pub name: String,
    /// Opaque initiator label (script, img, css, fetch, ...)
    pub initiator_type: String,
    /// Bytes transferred over the network; 0 for cache hits and inlined data
    #[serde(default)]
    pub transfer_size: u64,
    /// Fetch duration in milliseconds
    #[serde(default)]
    pub duration: f64,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<String>,
        initiator_type: impl Into<String>,
        transfer_size: u64,
        duration: f64,
    ) -> Self {
        Self {
            name: name.into(),
            initiator_type: initiator_type.into(),
            transfer_size,
            duration,
        }
    }
}

/// Page-level timing reported alongside the resource list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetrics {
    /// Total main-thread task time in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_duration: Option<f64>,
}

impl PageMetrics {
    pub fn new(task_duration: Option<f64>) -> Self {
        Self { task_duration }
    }

    /// Task duration with an absent value read as zero
    pub fn load_time_ms(&self) -> f64 {
        self.task_duration.unwrap_or(0.0)
    }
}

/// Everything collected from one page load
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub metrics: PageMetrics,
    pub resources: Vec<ResourceRecord>,
}

impl PageSnapshot {
    pub fn new(metrics: PageMetrics, resources: Vec<ResourceRecord>) -> Self {
        Self {
            url: None,
            captured_at: None,
            metrics,
            resources,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = Some(captured_at);
        self
    }
}
