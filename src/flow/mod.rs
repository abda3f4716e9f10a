//! Assessment flow: a linear-with-jump state machine over the question
//! index, gated by answer presence.
//!
//! All session state lives in an explicit [`AssessmentSession`] value;
//! there is no module-level mutable state. The catalogue load that
//! precedes construction is the "loading" phase of the lifecycle, so the
//! state enum proper starts at `Intro`.

use crate::catalog::Catalog;
use crate::core::{Answer, AnswerStore, Question};
use crate::errors::FormatError;
use crate::report::{build_report, AssessmentReport};
use crate::session::{import_session, serialize_session, SessionDocument, SessionImport};
use chrono::Utc;
use thiserror::Error;

/// Where the user currently is in the assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowState {
    Intro,
    Assessing,
    Reviewing,
}

/// A transition that the current state does not permit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("consent is required before starting")]
    ConsentPending,

    #[error("assessment has already started")]
    AlreadyStarted,

    #[error("not currently assessing")]
    NotAssessing,

    #[error("current question has no answer yet")]
    Unanswered,

    #[error("no answers recorded yet")]
    NoAnswers,

    #[error("assessment was not entered from the review view")]
    NotFromReview,
}

/// Outcome of a `next` transition.
#[derive(Debug)]
pub enum Advance {
    /// Moved to the question at this index.
    Question(usize),
    /// Past the last question: the report was recomputed and the session
    /// is now reviewing.
    Review(Box<AssessmentReport>),
}

/// One assessment session: catalogue, answer store, cursor and view state.
///
/// Constructed at startup and on restart; handed to the session codec for
/// persistence. The answer store has no other writer.
#[derive(Clone, Debug)]
pub struct AssessmentSession {
    catalog: Catalog,
    answers: AnswerStore,
    current_index: usize,
    state: FlowState,
    came_from_review: bool,
    consent_required: bool,
    consent_given: bool,
}

impl AssessmentSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            answers: AnswerStore::new(),
            current_index: 0,
            state: FlowState::Intro,
            came_from_review: false,
            consent_required: false,
            consent_given: false,
        }
    }

    /// Like [`new`](Self::new), but `start` is blocked until
    /// [`give_consent`](Self::give_consent) is called.
    pub fn with_consent_gate(catalog: Catalog) -> Self {
        Self {
            consent_required: true,
            ..Self::new(catalog)
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.answers
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.catalog.question(self.current_index)
    }

    pub fn is_current_answered(&self) -> bool {
        self.current_question()
            .is_some_and(|q| self.answers.contains_key(&q.id))
    }

    pub fn has_any_answer(&self) -> bool {
        !self.answers.is_empty()
    }

    pub fn give_consent(&mut self) {
        self.consent_given = true;
    }

    /// Intro -> Assessing. Blocked while the consent gate is unchecked.
    pub fn start(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Intro {
            return Err(FlowError::AlreadyStarted);
        }
        if self.consent_required && !self.consent_given {
            return Err(FlowError::ConsentPending);
        }
        self.state = FlowState::Assessing;
        Ok(())
    }

    /// Record an answer for the current question. Does not auto-advance.
    pub fn answer(&mut self, value: Answer) -> Result<(), FlowError> {
        if self.state != FlowState::Assessing {
            return Err(FlowError::NotAssessing);
        }
        let Some(q) = self.current_question() else {
            return Err(FlowError::NotAssessing);
        };
        let id = q.id.clone();
        self.answers.insert(id, value);
        Ok(())
    }

    /// Advance past an answered question. Past the last question this is
    /// the one path that recomputes the full report and enters review.
    pub fn next(&mut self) -> Result<Advance, FlowError> {
        if self.state != FlowState::Assessing {
            return Err(FlowError::NotAssessing);
        }
        if !self.is_current_answered() {
            return Err(FlowError::Unanswered);
        }
        if self.current_index + 1 < self.catalog.len() {
            self.current_index += 1;
            Ok(Advance::Question(self.current_index))
        } else {
            Ok(Advance::Review(Box::new(self.enter_review())))
        }
    }

    /// Step back one question, guarded at 0.
    pub fn previous(&mut self) -> Result<usize, FlowError> {
        if self.state != FlowState::Assessing {
            return Err(FlowError::NotAssessing);
        }
        self.current_index = self.current_index.saturating_sub(1);
        Ok(self.current_index)
    }

    /// Jump to an arbitrary question (navigation or priority-list click),
    /// clamped to catalogue bounds. Jumping out of review arms the
    /// return-to-review path.
    pub fn jump_to(&mut self, index: i64) -> usize {
        if self.state == FlowState::Reviewing {
            self.came_from_review = true;
        }
        self.current_index = self.catalog.clamp_index(index);
        self.state = FlowState::Assessing;
        self.current_index
    }

    /// Open the review from any state, provided at least one answer
    /// exists. Recomputes all derived statistics.
    pub fn open_review(&mut self) -> Result<AssessmentReport, FlowError> {
        if !self.has_any_answer() {
            return Err(FlowError::NoAnswers);
        }
        Ok(self.enter_review())
    }

    /// Reviewing -> Assessing, keeping the cursor.
    pub fn back_to_assess(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Reviewing {
            return Err(FlowError::NotAssessing);
        }
        self.came_from_review = true;
        self.state = FlowState::Assessing;
        Ok(())
    }

    /// Assessing -> Reviewing, only when assessment was entered from the
    /// review view.
    pub fn back_to_review(&mut self) -> Result<AssessmentReport, FlowError> {
        if self.state != FlowState::Assessing {
            return Err(FlowError::NotAssessing);
        }
        if !self.came_from_review {
            return Err(FlowError::NotFromReview);
        }
        Ok(self.enter_review())
    }

    /// Back to the intro with a cleared answer store and reset cursor.
    pub fn restart(&mut self) {
        self.answers.clear();
        self.current_index = 0;
        self.came_from_review = false;
        self.state = FlowState::Intro;
    }

    /// Recompute the full report from the current answer store.
    pub fn report(&self) -> AssessmentReport {
        build_report(self.catalog.questions(), &self.answers, Utc::now())
    }

    /// Snapshot the session for export.
    pub fn export_session(&self, data_file: &str) -> SessionDocument {
        serialize_session(
            &self.answers,
            self.current_index,
            &self.catalog,
            data_file,
            Utc::now(),
        )
    }

    /// Replace session state from a persisted document. Prior state is
    /// left untouched unless validation fully succeeds. A fully answered
    /// import resumes straight into review.
    pub fn import(&mut self, json: &str) -> Result<SessionImport, FormatError> {
        let imported = import_session(json, &self.catalog)?;
        self.answers = imported.answers.clone();
        self.current_index = imported.index;
        self.came_from_review = false;
        self.state = if imported.all_answered {
            FlowState::Reviewing
        } else {
            FlowState::Assessing
        };
        Ok(imported)
    }

    fn enter_review(&mut self) -> AssessmentReport {
        self.state = FlowState::Reviewing;
        self.report()
    }
}
