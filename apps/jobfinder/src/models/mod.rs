pub mod analysis;
pub mod job;

pub use analysis::AnalysisResult;
pub use job::{Job, JobSearchResults};
