use crate::Result;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::performance::{GetMetricsParams, Metric};
use pagegrade_core::{PageMetrics, PageSnapshot, ResourceRecord};

/// Projects the page's resource timeline to the fields the analyzer reads.
/// Serialized in the page so the result crosses CDP as one string.
const RESOURCE_ENTRIES_SCRIPT: &str = r#"JSON.stringify(
    performance.getEntriesByType('resource').map((entry) => ({
        name: entry.name,
        initiatorType: entry.initiatorType,
        transferSize: entry.transferSize,
        duration: entry.duration,
    }))
)"#;

/// CDP metric holding accumulated main-thread task time, in seconds
const TASK_DURATION_METRIC: &str = "TaskDuration";

/// Reads resource timings and page metrics from a loaded page
#[derive(Debug, Default)]
pub struct ResourceCollector;

impl ResourceCollector {
    pub fn new() -> Self {
        Self
    }

    pub async fn collect(&self, page: &Page) -> Result<PageSnapshot> {
        let metrics = self.page_metrics(page).await?;
        let resources = self.resource_entries(page).await?;

        tracing::info!(
            "Collected {} resource entries (task duration: {:?} ms)",
            resources.len(),
            metrics.task_duration
        );

        let mut snapshot =
            PageSnapshot::new(metrics, resources).with_captured_at(chrono::Utc::now());
        if let Some(url) = page.url().await? {
            snapshot = snapshot.with_url(url);
        }

        Ok(snapshot)
    }

    async fn resource_entries(&self, page: &Page) -> Result<Vec<ResourceRecord>> {
        tracing::debug!("Reading resource timing entries");

        let json: String = page.evaluate(RESOURCE_ENTRIES_SCRIPT).await?.into_value()?;
        parse_resource_entries(&json)
    }

    async fn page_metrics(&self, page: &Page) -> Result<PageMetrics> {
        // The performance domain is enabled when chromiumoxide attaches to the target
        tracing::debug!("Reading CDP performance metrics");

        let response = page.execute(GetMetricsParams::default()).await?;

        Ok(page_metrics_from_cdp(&response.result.metrics))
    }
}

fn parse_resource_entries(json: &str) -> Result<Vec<ResourceRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Pick out `TaskDuration` and convert it from seconds to milliseconds
fn page_metrics_from_cdp(metrics: &[Metric]) -> PageMetrics {
    let task_duration = metrics
        .iter()
        .find(|m| m.name == TASK_DURATION_METRIC)
        .map(|m| m.value * 1000.0);

    if task_duration.is_none() {
        tracing::warn!("Chrome reported no {} metric", TASK_DURATION_METRIC);
    }

    PageMetrics::new(task_duration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metric(name: &str, value: f64) -> Metric {
        Metric {
            name: name.to_string(),
            value,
        }
    }

    #[test]
    fn test_task_duration_is_converted_to_ms() {
        let metrics = vec![
            metric("Nodes", 120.0),
            metric("TaskDuration", 0.125),
            metric("ScriptDuration", 0.05),
        ];

        let page_metrics = page_metrics_from_cdp(&metrics);
        assert_eq!(page_metrics.task_duration, Some(125.0));
    }

    #[test]
    fn test_missing_task_duration() {
        let page_metrics = page_metrics_from_cdp(&[metric("Nodes", 3.0)]);
        assert_eq!(page_metrics.task_duration, None);
        assert_eq!(page_metrics.load_time_ms(), 0.0);
    }

    #[test]
    fn test_parse_resource_entries() {
        let json = r#"[
            {"name":"https://a.com/x.js","initiatorType":"script","transferSize":500000,"duration":50.2},
            {"name":"https://b.com/y.png","initiatorType":"img","transferSize":0,"duration":0}
        ]"#;

        let entries = parse_resource_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].initiator_type, "script");
        assert_eq!(entries[1].transfer_size, 0);
    }

    #[test]
    fn test_parse_resource_entries_rejects_garbage() {
        let err = parse_resource_entries("not json").unwrap_err();
        assert!(err.to_string().contains("resource timings"));
    }
}
