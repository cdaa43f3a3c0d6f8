pub mod analyze;
pub mod completion;
pub mod prompt;
pub mod render;
pub mod report;
