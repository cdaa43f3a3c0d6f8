pub mod analysis;
pub mod error;
pub mod format;
pub mod snapshot;

pub use analysis::{AnalysisReport, PerformanceGrade, analyze};
pub use error::{Error, Result};
pub use format::format_bytes;
pub use snapshot::{PageMetrics, PageSnapshot, ResourceRecord};
