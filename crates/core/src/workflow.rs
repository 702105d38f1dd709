//! Persona-analysis workflow: pick 3 to 10 documents, describe a persona and
//! a job, submit one query, show the ranked sections that come back.
//!
//! [`WorkflowState`] is an immutable snapshot; every change goes through
//! [`WorkflowState::apply`] with a named [`Action`]. [`PersonaSession`] wires
//! the snapshot to an [`AnalysisService`] and performs the one network call a
//! submission needs.

use crate::models::{PersonaQuery, PersonaQueryResult, DEFAULT_TOP_K};
use crate::selection::DocumentSelection;
use crate::traits::AnalysisService;
use crate::{ServiceError, WorkflowError};
use tracing::{info, warn};
use uuid::Uuid;

pub const QUERY_FAILED_FALLBACK: &str =
    "Failed to fetch results. Please check your backend and input.";
pub const STATUS_SUBMITTING: &str = "Encoding persona and job...";
pub const STATUS_COMPLETE: &str = "Analysis complete!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Selecting,
    /// One query is in flight; `query` is the snapshot that was sent.
    Submitting { query: PersonaQuery },
    Succeeded,
    /// Last query failed. Edits and resubmission are allowed as in `Selecting`.
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LoadCorpus(Vec<String>),
    SetPersona(String),
    SetJob(String),
    Select(String),
    Deselect(String),
    Toggle(String),
    /// Select every known document, or clear the selection if all are already picked.
    SelectAll,
    Submit,
    Succeed(PersonaQueryResult),
    Fail { message: String },
    Reset,
}

impl Action {
    pub fn fail(error: &ServiceError) -> Self {
        Action::Fail {
            message: error.user_message(QUERY_FAILED_FALLBACK),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowState {
    pub corpus: Vec<String>,
    pub selection: DocumentSelection,
    pub persona: String,
    pub job: String,
    pub phase: Phase,
    pub status: String,
    pub result: Option<PersonaQueryResult>,
    pub error: Option<String>,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            corpus: Vec::new(),
            selection: DocumentSelection::new(),
            persona: String::new(),
            job: String::new(),
            phase: Phase::Idle,
            status: String::new(),
            result: None,
            error: None,
        }
    }
}

impl WorkflowState {
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// The query a submission would send right now, after validation.
    pub fn query(&self) -> Result<PersonaQuery, WorkflowError> {
        if self.persona.trim().is_empty() {
            return Err(WorkflowError::MissingPersona);
        }
        if self.job.trim().is_empty() {
            return Err(WorkflowError::MissingJob);
        }
        self.selection.check_bounds()?;

        Ok(PersonaQuery {
            persona: self.persona.clone(),
            job: self.job.clone(),
            pdf_names: self.selection.names().to_vec(),
            top_k: DEFAULT_TOP_K,
        })
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.query().is_ok()
    }

    pub fn apply(&self, action: Action) -> Result<WorkflowState, WorkflowError> {
        let mut next = self.clone();

        match action {
            Action::LoadCorpus(files) => {
                next.selection = DocumentSelection::new();
                for name in self.selection.names() {
                    if files.contains(name) {
                        next.selection.select(name.as_str());
                    }
                }
                next.corpus = files;
            }
            Action::SetPersona(persona) => {
                next.persona = persona;
                next.mark_editing();
            }
            Action::SetJob(job) => {
                next.job = job;
                next.mark_editing();
            }
            Action::Select(name) => {
                if !self.corpus.contains(&name) {
                    return Err(WorkflowError::UnknownDocument(name));
                }
                next.selection.select(name);
                next.mark_editing();
            }
            Action::Deselect(name) => {
                next.selection.deselect(&name);
                next.mark_editing();
            }
            Action::Toggle(name) => {
                if !self.selection.contains(&name) && !self.corpus.contains(&name) {
                    return Err(WorkflowError::UnknownDocument(name));
                }
                next.selection.toggle(&name);
                next.mark_editing();
            }
            Action::SelectAll => {
                next.selection.toggle_all(&self.corpus);
                next.mark_editing();
            }
            Action::Submit => {
                if self.is_submitting() {
                    return Err(WorkflowError::AlreadySubmitting);
                }
                let query = self.query()?;
                next.phase = Phase::Submitting { query };
                next.status = STATUS_SUBMITTING.to_string();
                next.result = None;
                next.error = None;
            }
            Action::Succeed(result) => {
                if !self.is_submitting() {
                    return Err(WorkflowError::NotSubmitting);
                }
                next.phase = Phase::Succeeded;
                next.status = STATUS_COMPLETE.to_string();
                next.result = Some(result);
                next.error = None;
            }
            Action::Fail { message } => {
                if !self.is_submitting() {
                    return Err(WorkflowError::NotSubmitting);
                }
                next.phase = Phase::Failed;
                next.status.clear();
                next.result = None;
                next.error = Some(message);
            }
            Action::Reset => {
                next = WorkflowState {
                    corpus: self.corpus.clone(),
                    ..WorkflowState::default()
                };
            }
        }

        Ok(next)
    }

    // Results and errors stay on screen while the form is edited.
    fn mark_editing(&mut self) {
        if matches!(self.phase, Phase::Idle | Phase::Failed) {
            self.phase = Phase::Selecting;
        }
    }
}

/// One persona-analysis session bound to a service.
pub struct PersonaSession<S> {
    id: Uuid,
    service: S,
    state: WorkflowState,
}

impl<S> PersonaSession<S>
where
    S: AnalysisService + Send + Sync,
{
    pub fn new(service: S) -> Self {
        Self {
            id: Uuid::new_v4(),
            service,
            state: WorkflowState::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn dispatch(&mut self, action: Action) -> Result<&WorkflowState, WorkflowError> {
        self.state = self.state.apply(action)?;
        Ok(&self.state)
    }

    /// Fetches the uploaded corpus. A failure leaves the state untouched.
    pub async fn load_corpus(&mut self) -> Result<&WorkflowState, ServiceError> {
        let listing = self.service.uploaded_files().await?;
        info!(session = %self.id, files = listing.files.len(), "corpus loaded");
        if let Ok(next) = self.state.apply(Action::LoadCorpus(listing.files)) {
            self.state = next;
        }
        Ok(&self.state)
    }

    /// Validates, sends exactly one query, and records its outcome.
    ///
    /// Validation failures return an error before any request is made. A
    /// service failure is not an `Err`: it lands in `state().error`.
    pub async fn submit(&mut self) -> Result<&WorkflowState, WorkflowError> {
        let pending = self.state.apply(Action::Submit)?;
        let query = match &pending.phase {
            Phase::Submitting { query } => query.clone(),
            _ => return Err(WorkflowError::NotSubmitting),
        };
        self.state = pending;

        info!(
            session = %self.id,
            documents = query.pdf_names.len(),
            top_k = query.top_k,
            "persona query submitted"
        );

        let outcome = match self.service.persona_query(&query).await {
            Ok(result) => {
                info!(
                    session = %self.id,
                    sections = result.extracted_sections.len(),
                    sub_sections = result.sub_section_analysis.len(),
                    "persona query complete"
                );
                Action::Succeed(result)
            }
            Err(error) => {
                warn!(
                    session = %self.id,
                    unreachable = error.is_unreachable(),
                    %error,
                    "persona query failed"
                );
                Action::fail(&error)
            }
        };

        self.state = self.state.apply(outcome)?;
        Ok(&self.state)
    }
}
