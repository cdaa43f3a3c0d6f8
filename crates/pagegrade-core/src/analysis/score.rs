use serde::Serialize;
use std::fmt;

/// Milliseconds of task time that cost one point
const LOAD_TIME_MS_PER_POINT: f64 = 100.0;
/// Transferred bytes that cost one point
const BYTES_PER_POINT: f64 = 1_000_000.0;
/// Requests that cost one point
const REQUESTS_PER_POINT: f64 = 2.0;

/// Letter grade, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PerformanceGrade {
    A,
    B,
    C,
    D,
    F,
}

impl PerformanceGrade {
    /// Map an overall score to its band; each band includes its lower bound
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceGrade::A
        } else if score >= 80.0 {
            PerformanceGrade::B
        } else if score >= 70.0 {
            PerformanceGrade::C
        } else if score >= 60.0 {
            PerformanceGrade::D
        } else {
            PerformanceGrade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceGrade::A => "A",
            PerformanceGrade::B => "B",
            PerformanceGrade::C => "C",
            PerformanceGrade::D => "D",
            PerformanceGrade::F => "F",
        }
    }
}

impl fmt::Display for PerformanceGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three sub-scores and their mean
///
/// Each sub-score starts at 100 and loses points linearly, never going
/// below 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceScore {
    pub load_time_score: f64,
    pub page_size_score: f64,
    pub request_count_score: f64,
    pub overall: f64,
}

impl PerformanceScore {
    pub fn compute(load_time_ms: f64, total_bytes: u64, request_count: usize) -> Self {
        let load_time_score = (100.0 - load_time_ms / LOAD_TIME_MS_PER_POINT).max(0.0);
        let page_size_score = (100.0 - total_bytes as f64 / BYTES_PER_POINT).max(0.0);
        let request_count_score = (100.0 - request_count as f64 / REQUESTS_PER_POINT).max(0.0);

        let overall = (load_time_score + page_size_score + request_count_score) / 3.0;

        Self {
            load_time_score,
            page_size_score,
            request_count_score,
            overall,
        }
    }

    pub fn grade(&self) -> PerformanceGrade {
        PerformanceGrade::from_score(self.overall)
    }
}
