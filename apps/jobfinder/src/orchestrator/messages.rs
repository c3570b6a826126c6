//! User-facing failure messages, one per outcome kind and workflow step.

use crate::analysis_client::CallOutcome;

pub const ENDPOINT_NOT_FOUND: &str =
    "Job search endpoint not found. Please check that the backend server is running and up to date.";

pub const RESUME_FAILED: &str = "Failed to analyze resume. Please try again.";

pub const ANALYSIS_FAILED: &str = "Failed to analyze your search query. Please try again.";

pub const SEARCH_FAILED: &str = "Failed to search for jobs. Please try again.";

pub const GENERIC_RETRY: &str = "Something went wrong. Please try again.";

pub fn unreachable(host: &str, port: u16) -> String {
    format!(
        "Cannot connect to the job search server at {host}. Please make sure the backend is running on port {port}."
    )
}

/// Picks the message for a failed call. `rejected` is used when the backend
/// answered with `success: false`, `fallback` for unclassified faults.
pub fn for_failure<T>(outcome: &CallOutcome<T>, rejected: &str, fallback: &str) -> String {
    match outcome {
        CallOutcome::ServerRejected { .. } => rejected.to_string(),
        CallOutcome::NotFound => ENDPOINT_NOT_FOUND.to_string(),
        CallOutcome::Unreachable { host, port } => unreachable(host, *port),
        CallOutcome::Unknown { .. } | CallOutcome::Ok(_) => fallback.to_string(),
    }
}
