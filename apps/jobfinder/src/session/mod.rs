//! Session state — the one shared record of the latest search.
//!
//! `Session` owns the state. Workflows get a `SessionWriter`, the results
//! screen gets a `SessionReader`; nobody else touches it. Every workflow run
//! holds a `WorkflowTicket` and commits made with a stale ticket are dropped,
//! so a slow response from an abandoned run never overwrites a newer one.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;
use uuid::Uuid;

use crate::models::{AnalysisResult, Job, JobSearchResults};

/// Keywords shown when the resume endpoint does not report any.
pub const DEFAULT_RESUME_KEYWORDS: &str = "Resume Analysis";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub jobs: Vec<Job>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_keywords: String,
    /// Server-reported count; may exceed `jobs.len()`.
    pub total_found: u32,
    /// Analysis from the latest text workflow, kept for display.
    pub analysis: Option<AnalysisResult>,
}

/// Identifies one workflow run. Only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkflowTicket(u64);

impl WorkflowTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    current_ticket: u64,
}

/// Owner of the session state.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    inner: Arc<Mutex<Inner>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn writer(&self) -> SessionWriter {
        SessionWriter {
            session_id: self.id,
            inner: Arc::clone(&self.inner),
        }
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader {
            inner: Arc::clone(&self.inner),
        }
    }
}

// The state is always left consistent between statements, so a poisoned
// lock is still safe to use.
fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Read-only view for presenters.
#[derive(Debug, Clone)]
pub struct SessionReader {
    inner: Arc<Mutex<Inner>>,
}

impl SessionReader {
    pub fn snapshot(&self) -> SessionState {
        lock(&self.inner).state.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.inner).state.loading
    }
}

/// Mutation rights over the session, handed to workflows.
#[derive(Debug, Clone)]
pub struct SessionWriter {
    session_id: Uuid,
    inner: Arc<Mutex<Inner>>,
}

impl SessionWriter {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Starts a workflow run: clears the previous results and error, sets
    /// `loading` and issues a fresh ticket.
    pub fn begin(&self) -> WorkflowGuard {
        let mut inner = lock(&self.inner);
        inner.current_ticket += 1;
        inner.state = SessionState {
            loading: true,
            ..SessionState::default()
        };
        let ticket = WorkflowTicket(inner.current_ticket);
        debug!(ticket = ticket.0, "workflow started");

        WorkflowGuard {
            writer: self.clone(),
            ticket,
        }
    }

    /// Reports an error that was caught before any network call.
    ///
    /// Does not start a run, but supersedes any run still in flight.
    pub fn reject(&self, message: impl Into<String>) {
        let mut inner = lock(&self.inner);
        inner.current_ticket += 1;
        inner.state.loading = false;
        inner.state.error = Some(message.into());
    }

    fn with_current<F>(&self, ticket: WorkflowTicket, f: F) -> bool
    where
        F: FnOnce(&mut SessionState),
    {
        let mut inner = lock(&self.inner);
        if inner.current_ticket != ticket.0 {
            debug!(
                ticket = ticket.0,
                current = inner.current_ticket,
                "discarding stale workflow update"
            );
            return false;
        }
        f(&mut inner.state);
        true
    }
}

/// A running workflow's handle on the session.
///
/// Dropping the guard clears `loading` if this run is still current, so an
/// early return, panic or cancelled future never leaves the session stuck.
#[derive(Debug)]
pub struct WorkflowGuard {
    writer: SessionWriter,
    ticket: WorkflowTicket,
}

impl WorkflowGuard {
    pub fn ticket(&self) -> WorkflowTicket {
        self.ticket
    }

    /// Keeps the analysis for display while the run continues.
    pub fn record_analysis(&self, analysis: AnalysisResult) -> bool {
        self.writer
            .with_current(self.ticket, |state| state.analysis = Some(analysis))
    }

    /// Publishes results and ends the run. Returns false if the run was stale.
    pub fn complete(self, results: JobSearchResults, default_keywords: &str) -> bool {
        self.writer.with_current(self.ticket, |state| {
            state.jobs = results.jobs;
            state.search_keywords = results
                .search_keywords
                .unwrap_or_else(|| default_keywords.to_string());
            state.total_found = results.total_found.unwrap_or(0);
            state.error = None;
            state.loading = false;
        })
    }

    /// Ends the run with an error. Returns false if the run was stale.
    pub fn fail(self, message: impl Into<String>) -> bool {
        let message = message.into();
        self.writer.with_current(self.ticket, |state| {
            state.loading = false;
            state.error = Some(message);
        })
    }
}

impl Drop for WorkflowGuard {
    fn drop(&mut self) {
        self.writer
            .with_current(self.ticket, |state| state.loading = false);
    }
}
