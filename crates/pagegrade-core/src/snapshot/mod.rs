mod reader;
mod types;
mod writer;

pub use reader::SnapshotReader;
pub use types::*;
pub use writer::SnapshotWriter;
