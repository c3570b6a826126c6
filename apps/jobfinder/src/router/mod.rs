//! View router — four screens and the wiring between them.
//!
//! Chooser → {ResumeEntry, TextEntry} → Results → (new search) → Chooser.
//! Entry screens get the orchestrator (and through it, session write access);
//! the results screen gets a read-only presenter view.

use std::sync::Arc;

use tracing::debug;

use crate::analysis_client::JobBackend;
use crate::errors::RouterError;
use crate::orchestrator::{Navigation, SearchOrchestrator};
use crate::presenter::{present, ResultView};
use crate::session::Session;
use crate::upload::UploadCandidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chooser,
    ResumeEntry,
    TextEntry,
    Results,
}

impl Screen {
    fn can_reach(self, to: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, to),
            (Chooser, ResumeEntry)
                | (Chooser, TextEntry)
                | (ResumeEntry, Results)
                | (TextEntry, Results)
                | (ResumeEntry, Chooser)
                | (TextEntry, Chooser)
                | (Results, Chooser)
        )
    }
}

pub struct ViewRouter {
    current: Screen,
    session: Session,
    orchestrator: SearchOrchestrator,
    transitions: Vec<(Screen, Screen)>,
}

impl ViewRouter {
    pub fn new(backend: Arc<dyn JobBackend>) -> Self {
        Self::with_session(backend, Session::new())
    }

    pub fn with_session(backend: Arc<dyn JobBackend>, session: Session) -> Self {
        let orchestrator = SearchOrchestrator::new(backend, session.writer());
        Self {
            current: Screen::Chooser,
            session,
            orchestrator,
            transitions: Vec::new(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Every transition taken so far, oldest first.
    pub fn transitions(&self) -> &[(Screen, Screen)] {
        &self.transitions
    }

    fn go(&mut self, to: Screen) -> Result<(), RouterError> {
        let from = self.current;
        if !from.can_reach(to) {
            return Err(RouterError::IllegalTransition { from, to });
        }
        debug!("screen {from:?} -> {to:?}");
        self.transitions.push((from, to));
        self.current = to;
        Ok(())
    }

    fn expect_screen(&self, screen: Screen) -> Result<(), RouterError> {
        if self.current != screen {
            return Err(RouterError::WrongScreen {
                expected: screen,
                actual: self.current,
            });
        }
        if self.session.reader().is_loading() {
            return Err(RouterError::Busy);
        }
        Ok(())
    }

    pub fn open_resume_entry(&mut self) -> Result<(), RouterError> {
        self.go(Screen::ResumeEntry)
    }

    pub fn open_text_entry(&mut self) -> Result<(), RouterError> {
        self.go(Screen::TextEntry)
    }

    /// Leaves an entry screen without searching.
    pub fn back(&mut self) -> Result<(), RouterError> {
        match self.current {
            Screen::ResumeEntry | Screen::TextEntry => self.go(Screen::Chooser),
            from => Err(RouterError::IllegalTransition {
                from,
                to: Screen::Chooser,
            }),
        }
    }

    pub fn new_search(&mut self) -> Result<(), RouterError> {
        match self.current {
            Screen::Results => self.go(Screen::Chooser),
            from => Err(RouterError::IllegalTransition {
                from,
                to: Screen::Chooser,
            }),
        }
    }

    fn apply(&mut self, navigation: Navigation) -> Result<Navigation, RouterError> {
        if navigation == Navigation::ToResults {
            self.go(Screen::Results)?;
        }
        Ok(navigation)
    }

    pub async fn submit_resume(
        &mut self,
        candidates: Vec<UploadCandidate>,
    ) -> Result<Navigation, RouterError> {
        self.expect_screen(Screen::ResumeEntry)?;
        let navigation = self.orchestrator.submit_resume(candidates).await;
        self.apply(navigation)
    }

    pub async fn submit_text(&mut self, query: &str) -> Result<Navigation, RouterError> {
        self.expect_screen(Screen::TextEntry)?;
        let navigation = self.orchestrator.submit_text(query).await;
        self.apply(navigation)
    }

    /// Error to show inline on the active entry screen, if any.
    pub fn entry_error(&self) -> Option<String> {
        match self.current {
            Screen::ResumeEntry | Screen::TextEntry => self.session.reader().snapshot().error,
            _ => None,
        }
    }

    pub fn results_view(&self) -> ResultView {
        present(&self.session.reader().snapshot())
    }
}
