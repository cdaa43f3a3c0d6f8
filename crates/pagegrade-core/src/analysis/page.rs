use super::{AnalysisReport, Analyzer, Breakdown, PerformanceScore};
use crate::format::format_load_time;
use crate::snapshot::{PageMetrics, PageSnapshot, ResourceRecord};
use crate::{Error, Result};

/// Analyze one page load
///
/// Pure function of its inputs. Any record with an unparseable URL or a
/// negative/non-finite timing fails the whole call.
pub fn analyze(metrics: &PageMetrics, resources: &[ResourceRecord]) -> Result<AnalysisReport> {
    tracing::debug!("Analyzing {} resources", resources.len());

    validate(metrics, resources)?;

    let page_size = total_transfer_size(resources)?;
    let load_time_ms = metrics.load_time_ms();
    let number_of_requests = resources.len();

    let breakdown = Breakdown::from_resources(resources)?;
    let score = PerformanceScore::compute(load_time_ms, page_size, number_of_requests);
    let performance_grade = score.grade();

    tracing::info!(
        "Page analysis complete: grade={}, score={:.2}, {} requests, {} bytes",
        performance_grade,
        score.overall,
        number_of_requests,
        page_size
    );

    Ok(AnalysisReport {
        performance_grade,
        page_size,
        load_time: format_load_time(load_time_ms),
        number_of_requests,
        content_size_by_type: breakdown.content_size_by_type,
        content_size_by_domain: breakdown.content_size_by_domain,
        requests_by_type: breakdown.requests_by_type,
        requests_by_domain: breakdown.requests_by_domain,
        requests_by_file: breakdown.requests_by_file,
        score,
    })
}

fn total_transfer_size(resources: &[ResourceRecord]) -> Result<u64> {
    resources.iter().try_fold(0u64, |total, resource| {
        total
            .checked_add(resource.transfer_size)
            .ok_or_else(|| Error::SizeOverflow {
                url: resource.name.clone(),
            })
    })
}

fn validate(metrics: &PageMetrics, resources: &[ResourceRecord]) -> Result<()> {
    if let Some(task_duration) = metrics.task_duration {
        check_non_negative("taskDuration", task_duration)?;
    }
    for resource in resources {
        check_non_negative("duration", resource.duration)?;
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidNumericInput { field, value })
    }
}

/// [`Analyzer`] over a collected [`PageSnapshot`]
#[derive(Debug, Default, Clone, Copy)]
pub struct PageAnalyzer;

impl Analyzer for PageAnalyzer {
    type Output = AnalysisReport;

    fn analyze(&self, snapshot: &PageSnapshot) -> Result<Self::Output> {
        if snapshot.resources.is_empty() {
            tracing::warn!("Snapshot has no resources; grading page timing only");
        }
        analyze(&snapshot.metrics, &snapshot.resources)
    }
}
