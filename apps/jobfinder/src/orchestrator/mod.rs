//! Search orchestrator — runs the resume and text workflows.
//!
//! Resume: validate → analyze-resume → publish.
//! Text:   validate → analyze-text → search-jobs(location derived from analysis) → publish.
//!
//! Failures never escape as errors: they become the session's `error` string
//! and the caller stays on the current screen.

use std::sync::Arc;

use tracing::{debug, info, info_span, warn, Instrument};

use crate::analysis_client::{CallOutcome, JobBackend};
use crate::errors::ValidationError;
use crate::session::{SessionWriter, DEFAULT_RESUME_KEYWORDS};
use crate::upload::{select_resume, ResumeFile, UploadCandidate};

pub mod messages;

/// What the caller should do once a workflow finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    ToResults,
}

#[derive(Clone)]
pub struct SearchOrchestrator {
    backend: Arc<dyn JobBackend>,
    session: SessionWriter,
}

impl SearchOrchestrator {
    pub fn new(backend: Arc<dyn JobBackend>, session: SessionWriter) -> Self {
        Self { backend, session }
    }

    fn reject(&self, error: ValidationError) -> Navigation {
        debug!("input rejected: {error}");
        self.session.reject(error.to_string());
        Navigation::Stay
    }

    /// Validates the picked files, then runs the resume workflow.
    pub async fn submit_resume(&self, candidates: Vec<UploadCandidate>) -> Navigation {
        match select_resume(candidates) {
            Ok(resume) => self.run_resume(resume).await,
            Err(e) => self.reject(e),
        }
    }

    pub async fn run_resume(&self, resume: ResumeFile) -> Navigation {
        let run = self.session.begin();
        let span = info_span!(
            "resume_workflow",
            session = %self.session.session_id(),
            ticket = run.ticket().id()
        );

        async move {
            info!("analyzing resume '{}'", resume.file_name);

            match self.backend.analyze_resume(&resume).await {
                CallOutcome::Ok(results) => {
                    let found = results.jobs.len();
                    if run.complete(results, DEFAULT_RESUME_KEYWORDS) {
                        info!("resume analysis returned {found} jobs");
                        Navigation::ToResults
                    } else {
                        Navigation::Stay
                    }
                }
                failure => {
                    warn!("resume analysis failed: {:?}", failure.kind());
                    run.fail(messages::for_failure(
                        &failure,
                        messages::RESUME_FAILED,
                        messages::RESUME_FAILED,
                    ));
                    Navigation::Stay
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Trims and validates the query, then runs the two-phase text workflow.
    pub async fn submit_text(&self, query: &str) -> Navigation {
        let query = query.trim();
        if query.is_empty() {
            return self.reject(ValidationError::EmptyQuery);
        }

        let run = self.session.begin();
        let span = info_span!(
            "text_workflow",
            session = %self.session.session_id(),
            ticket = run.ticket().id()
        );

        async move {
            info!("analyzing query '{query}'");

            let analysis = match self.backend.analyze_text(query).await {
                CallOutcome::Ok(analysis) => analysis,
                failure => {
                    warn!("text analysis failed: {:?}", failure.kind());
                    run.fail(messages::for_failure(
                        &failure,
                        messages::ANALYSIS_FAILED,
                        messages::GENERIC_RETRY,
                    ));
                    return Navigation::Stay;
                }
            };

            let location = analysis.location_filter();
            if !run.record_analysis(analysis) {
                // Superseded by a newer run; its search would be discarded anyway.
                return Navigation::Stay;
            }

            info!("searching jobs (location: '{location}')");
            match self.backend.search_jobs(query, location).await {
                CallOutcome::Ok(results) => {
                    let found = results.jobs.len();
                    if run.complete(results, query) {
                        info!("job search returned {found} jobs");
                        Navigation::ToResults
                    } else {
                        Navigation::Stay
                    }
                }
                failure => {
                    warn!("job search failed: {:?}", failure.kind());
                    run.fail(messages::for_failure(
                        &failure,
                        messages::SEARCH_FAILED,
                        messages::GENERIC_RETRY,
                    ));
                    Navigation::Stay
                }
            }
        }
        .instrument(span)
        .await
    }
}
