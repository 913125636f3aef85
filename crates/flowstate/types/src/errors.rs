//! Error taxonomy shared across the workflow engine
//!
//! Three families matter to callers: validation errors (structural
//! definition problems, detected once at registration), not-found errors
//! (unknown workflow or instance id), and transition errors (the requested
//! action is illegal for the instance right now, but the instance itself
//! remains usable). [`WorkflowError::kind`] exposes the family so a
//! transport shell can pick a status without parsing messages.

use crate::{ActionId, StateId, WorkflowDefinitionId, WorkflowInstanceId};

/// Errors that can occur in workflow operations
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    // ── Validation ───────────────────────────────────────────────────
    #[error("workflow definition must have a non-empty id")]
    EmptyDefinitionId,

    #[error("workflow definition id already exists: {0}")]
    DuplicateDefinition(WorkflowDefinitionId),

    #[error("workflow definition must have an initial state")]
    MissingInitialState,

    #[error("workflow definition must have exactly one initial state")]
    MultipleInitialStates,

    #[error("duplicate state id: {0}")]
    DuplicateStateId(StateId),

    #[error("duplicate action id: {0}")]
    DuplicateActionId(ActionId),

    #[error("action '{action}' refers to unknown state '{state}'")]
    UnknownStateRef { action: ActionId, state: StateId },

    // ── Not found ────────────────────────────────────────────────────
    #[error("workflow definition not found: {0}")]
    DefinitionNotFound(WorkflowDefinitionId),

    #[error("workflow instance not found: {0}")]
    InstanceNotFound(WorkflowInstanceId),

    // ── Transition ───────────────────────────────────────────────────
    #[error("action not found in this workflow: {0}")]
    ActionNotFound(ActionId),

    #[error("action is disabled: {0}")]
    ActionDisabled(ActionId),

    #[error("action '{action}' is not valid from current state '{current}'")]
    InvalidTransition { action: ActionId, current: StateId },

    #[error("no action may be applied from final state '{0}'")]
    InstanceInFinalState(StateId),

    // ── Internal ─────────────────────────────────────────────────────
    #[error("registry lock poisoned")]
    LockPoisoned,
}

/// The taxonomy family of a [`WorkflowError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Structural definition problem; fix the definition and resubmit
    Validation,
    /// Unknown workflow or instance id; terminal for the request
    NotFound,
    /// Action illegal for the instance right now; the instance is
    /// unaffected and remains usable
    Transition,
    /// Engine invariant breach; never expected in normal operation
    Internal,
}

impl WorkflowError {
    /// Classify this error into its taxonomy family
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyDefinitionId
            | Self::DuplicateDefinition(_)
            | Self::MissingInitialState
            | Self::MultipleInitialStates
            | Self::DuplicateStateId(_)
            | Self::DuplicateActionId(_)
            | Self::UnknownStateRef { .. } => ErrorKind::Validation,

            Self::DefinitionNotFound(_) | Self::InstanceNotFound(_) => ErrorKind::NotFound,

            Self::ActionNotFound(_)
            | Self::ActionDisabled(_)
            | Self::InvalidTransition { .. }
            | Self::InstanceInFinalState(_) => ErrorKind::Transition,

            Self::LockPoisoned => ErrorKind::Internal,
        }
    }
}

/// Result type alias for workflow operations
pub type WorkflowResult<T> = Result<T, WorkflowError>;
