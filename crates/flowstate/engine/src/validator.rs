//! Validator: checks a candidate definition for structural integrity
//!
//! Validation happens once, at registration, before the registry stores
//! anything. Checks run in a fixed order and short-circuit on the first
//! failure, so a definition with several defects always reports the same
//! error. The validator never mutates; acceptance and storage are two
//! distinct steps from the caller's point of view.

use flowstate_types::{WorkflowDefinition, WorkflowDefinitionId, WorkflowError, WorkflowResult};
use std::collections::HashSet;

/// Validate a candidate definition against the structural rules and the
/// set of already-registered ids
pub fn validate(
    definition: &WorkflowDefinition,
    existing: &HashSet<WorkflowDefinitionId>,
) -> WorkflowResult<()> {
    validate_id(definition)?;
    validate_not_registered(definition, existing)?;
    validate_single_initial_state(definition)?;
    validate_unique_state_ids(definition)?;
    validate_unique_action_ids(definition)?;
    validate_state_references(definition)?;
    Ok(())
}

fn validate_id(definition: &WorkflowDefinition) -> WorkflowResult<()> {
    if definition.id.is_empty() {
        return Err(WorkflowError::EmptyDefinitionId);
    }
    Ok(())
}

fn validate_not_registered(
    definition: &WorkflowDefinition,
    existing: &HashSet<WorkflowDefinitionId>,
) -> WorkflowResult<()> {
    if existing.contains(&definition.id) {
        return Err(WorkflowError::DuplicateDefinition(definition.id.clone()));
    }
    Ok(())
}

fn validate_single_initial_state(definition: &WorkflowDefinition) -> WorkflowResult<()> {
    let initial_count = definition.states.iter().filter(|s| s.is_initial).count();
    if initial_count == 0 {
        return Err(WorkflowError::MissingInitialState);
    }
    if initial_count > 1 {
        return Err(WorkflowError::MultipleInitialStates);
    }
    Ok(())
}

fn validate_unique_state_ids(definition: &WorkflowDefinition) -> WorkflowResult<()> {
    let mut seen = HashSet::new();
    for state in &definition.states {
        if !seen.insert(&state.id) {
            return Err(WorkflowError::DuplicateStateId(state.id.clone()));
        }
    }
    Ok(())
}

fn validate_unique_action_ids(definition: &WorkflowDefinition) -> WorkflowResult<()> {
    let mut seen = HashSet::new();
    for action in &definition.actions {
        if !seen.insert(&action.id) {
            return Err(WorkflowError::DuplicateActionId(action.id.clone()));
        }
    }
    Ok(())
}

fn validate_state_references(definition: &WorkflowDefinition) -> WorkflowResult<()> {
    let state_ids: HashSet<_> = definition.states.iter().map(|s| &s.id).collect();

    for action in &definition.actions {
        if !state_ids.contains(&action.to_state) {
            return Err(WorkflowError::UnknownStateRef {
                action: action.id.clone(),
                state: action.to_state.clone(),
            });
        }
        for from in &action.from_states {
            if !state_ids.contains(from) {
                return Err(WorkflowError::UnknownStateRef {
                    action: action.id.clone(),
                    state: from.clone(),
                });
            }
        }
    }
    Ok(())
}
