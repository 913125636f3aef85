//! Transition engine: starts instances and applies actions
//!
//! The engine re-checks only what the registration-time validator cannot
//! know in advance: the action's `enabled` flag and the instance's current
//! position. Every check precedes the single mutation, so a rejected
//! action leaves the instance exactly as it was.

use chrono::{DateTime, Utc};
use flowstate_types::{
    ActionId, WorkflowDefinition, WorkflowError, WorkflowInstance, WorkflowResult,
};

/// Decides whether a requested transition is legal and, if so, applies it
#[derive(Clone, Debug, Default)]
pub struct TransitionEngine;

impl TransitionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build a fresh instance of a definition, positioned at its initial
    /// state with empty history.
    ///
    /// A definition that passed validation always has exactly one initial
    /// state, so the error path here is unreachable for registered
    /// definitions.
    pub fn start(&self, definition: &WorkflowDefinition) -> WorkflowResult<WorkflowInstance> {
        let initial = definition
            .initial_state()
            .ok_or(WorkflowError::MissingInitialState)?;

        Ok(WorkflowInstance::new(
            definition.id.clone(),
            initial.id.clone(),
        ))
    }

    /// Apply `action_id` to `instance`, mutating it on success.
    ///
    /// Checks, in order: the action exists, it is enabled, the current
    /// state is not final, and the current state is among the action's
    /// allowed sources. The final-state check runs before the source
    /// check so that a definition naming a final state as a source still
    /// reports the more specific error.
    pub fn apply(
        &self,
        instance: &mut WorkflowInstance,
        definition: &WorkflowDefinition,
        action_id: &ActionId,
        now: DateTime<Utc>,
    ) -> WorkflowResult<()> {
        let action = definition
            .get_action(action_id)
            .ok_or_else(|| WorkflowError::ActionNotFound(action_id.clone()))?;

        if !action.enabled {
            return Err(WorkflowError::ActionDisabled(action_id.clone()));
        }

        if let Some(current) = definition.get_state(&instance.current_state) {
            if current.is_final {
                return Err(WorkflowError::InstanceInFinalState(current.id.clone()));
            }
        }

        if !action.applies_from(&instance.current_state) {
            return Err(WorkflowError::InvalidTransition {
                action: action_id.clone(),
                current: instance.current_state.clone(),
            });
        }

        instance.advance(action_id.clone(), action.to_state.clone(), now);

        tracing::debug!(
            instance_id = %instance.id,
            action_id = %action_id,
            to_state = %instance.current_state,
            "Transition applied"
        );
        Ok(())
    }
}
