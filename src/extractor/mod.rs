pub mod concatenator;
pub mod report;

pub use concatenator::{format_header, write_block, ConcatProgress, Concatenator, Phase};
pub use report::{ConcatReport, FileInfo, PhaseSummary};
