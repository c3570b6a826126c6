//! Result presenter — a pure mapping from `SessionState` to what the results
//! screen shows. Precedence: loading, then error, then empty, then the list.

use std::fmt;

use crate::session::SessionState;

pub mod analysis_summary;
pub mod job_card;

pub use analysis_summary::AnalysisSummary;
pub use job_card::JobCard;

pub const RETRY_HINT: &str = "Try different keywords or start a new search.";

#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Loading,
    Error {
        message: String,
    },
    Empty {
        keywords: String,
    },
    Jobs {
        keywords: String,
        shown: usize,
        total_found: u32,
        analysis: Option<AnalysisSummary>,
        /// In backend order; position is the only identity.
        cards: Vec<JobCard>,
    },
}

pub fn present(state: &SessionState) -> ResultView {
    if state.loading {
        return ResultView::Loading;
    }
    if let Some(message) = &state.error {
        return ResultView::Error {
            message: message.clone(),
        };
    }
    if state.jobs.is_empty() {
        return ResultView::Empty {
            keywords: state.search_keywords.clone(),
        };
    }

    ResultView::Jobs {
        keywords: state.search_keywords.clone(),
        shown: state.jobs.len(),
        total_found: state.total_found,
        analysis: state.analysis.as_ref().map(AnalysisSummary::from),
        cards: state.jobs.iter().map(JobCard::from_job).collect(),
    }
}

/// "Showing X of Y". The server total is never assumed to match the list.
pub fn count_line(shown: usize, total_found: u32) -> String {
    let total = total_found as usize;
    if total >= shown {
        format!("Showing {shown} of {total} jobs")
    } else {
        format!("Showing {shown} jobs ({total} reported by the server)")
    }
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultView::Loading => write!(f, "Loading jobs..."),
            ResultView::Error { message } => write!(f, "Error: {message}"),
            ResultView::Empty { keywords } => {
                if keywords.is_empty() {
                    writeln!(f, "No jobs found.")?;
                } else {
                    writeln!(f, "No jobs found for \"{keywords}\".")?;
                }
                write!(f, "{RETRY_HINT}")
            }
            ResultView::Jobs {
                keywords,
                shown,
                total_found,
                analysis,
                cards,
            } => {
                writeln!(f, "Matching jobs for \"{keywords}\"")?;
                writeln!(f, "{}", count_line(*shown, *total_found))?;
                if let Some(analysis) = analysis {
                    writeln!(f)?;
                    writeln!(f, "{analysis}")?;
                }
                for (index, card) in cards.iter().enumerate() {
                    writeln!(f)?;
                    writeln!(f, "{}. {card}", index + 1)?;
                }
                Ok(())
            }
        }
    }
}
