mod breakdown;
mod page;
mod score;

pub use breakdown::{Breakdown, host_of};
pub use page::{PageAnalyzer, analyze};
pub use score::{PerformanceGrade, PerformanceScore};

use crate::snapshot::PageSnapshot;
use serde::Serialize;
use std::collections::HashMap;

/// Result of analyzing one page load
///
/// Byte fields hold raw counts; use [`crate::format_bytes`] to render them.
/// Map key order is unspecified.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub performance_grade: PerformanceGrade,
    pub page_size: u64,
    pub load_time: String,
    pub number_of_requests: usize,
    pub content_size_by_type: HashMap<String, u64>,
    pub content_size_by_domain: HashMap<String, u64>,
    pub requests_by_type: HashMap<String, usize>,
    pub requests_by_domain: HashMap<String, usize>,
    pub requests_by_file: HashMap<String, u64>,
    pub score: PerformanceScore,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, snapshot: &PageSnapshot) -> crate::Result<Self::Output>;
}
