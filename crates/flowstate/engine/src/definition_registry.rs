//! Definition registry: stores and retrieves accepted definitions
//!
//! Definitions are immutable once registered; replacing one means
//! registering under a new id. Insertion is the only mutating operation.
//! Validation runs under the write lock, so the duplicate-id check and
//! the insert are atomic with respect to concurrent registrations.

use crate::validator;
use flowstate_types::{WorkflowDefinition, WorkflowDefinitionId, WorkflowError, WorkflowResult};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Registry of accepted workflow definitions
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    /// All registered definitions, keyed by id. Entries are `Arc`-shared:
    /// once published, a definition is read without further locking.
    definitions: RwLock<HashMap<WorkflowDefinitionId, Arc<WorkflowDefinition>>>,
}

impl DefinitionRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            definitions: RwLock::new(HashMap::new()),
        }
    }

    /// Validate and store a definition. Returns the definition id.
    ///
    /// On any validation failure nothing is stored; a subsequent `get`
    /// for the candidate id finds nothing.
    pub fn register(
        &self,
        definition: WorkflowDefinition,
    ) -> WorkflowResult<WorkflowDefinitionId> {
        let mut definitions = self
            .definitions
            .write()
            .map_err(|_| WorkflowError::LockPoisoned)?;

        let existing = definitions.keys().cloned().collect();
        validator::validate(&definition, &existing)?;

        let id = definition.id.clone();
        definitions.insert(id.clone(), Arc::new(definition));

        tracing::info!(definition_id = %id, "Workflow definition registered");
        Ok(id)
    }

    /// Get a definition by id
    pub fn get(&self, id: &WorkflowDefinitionId) -> WorkflowResult<Arc<WorkflowDefinition>> {
        self.definitions
            .read()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::DefinitionNotFound(id.clone()))
    }

    /// Check if a definition exists
    pub fn contains(&self, id: &WorkflowDefinitionId) -> WorkflowResult<bool> {
        Ok(self
            .definitions
            .read()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .contains_key(id))
    }

    /// All registered definitions
    pub fn list(&self) -> WorkflowResult<Vec<Arc<WorkflowDefinition>>> {
        Ok(self
            .definitions
            .read()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .values()
            .cloned()
            .collect())
    }

    /// Total number of registered definitions
    pub fn count(&self) -> WorkflowResult<usize> {
        Ok(self
            .definitions
            .read()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowstate_types::{Action, State};

    fn make_valid_definition(id: &str) -> WorkflowDefinition {
        WorkflowDefinition::new(id)
            .with_state(State::initial("draft", "Draft"))
            .with_state(State::terminal("done", "Done"))
            .with_action(Action::new("finish", "Finish", "done").from_state("draft"))
    }

    #[test]
    fn test_register_and_get() {
        let registry = DefinitionRegistry::new();
        let id = registry.register(make_valid_definition("doc")).unwrap();

        let retrieved = registry.get(&id).unwrap();
        assert_eq!(retrieved.id, id);
        assert!(registry.contains(&id).unwrap());
        assert_eq!(registry.count().unwrap(), 1);
    }

    #[test]
    fn test_register_duplicate_id() {
        let registry = DefinitionRegistry::new();
        registry.register(make_valid_definition("doc")).unwrap();

        let result = registry.register(make_valid_definition("doc"));
        assert!(matches!(
            result,
            Err(WorkflowError::DuplicateDefinition(_))
        ));
        assert_eq!(registry.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_registration_stores_nothing() {
        let registry = DefinitionRegistry::new();
        // No initial state — rejected.
        let def = WorkflowDefinition::new("bad").with_state(State::new("a", "A"));

        assert!(registry.register(def).is_err());
        let result = registry.get(&WorkflowDefinitionId::new("bad"));
        assert!(matches!(
            result,
            Err(WorkflowError::DefinitionNotFound(_))
        ));
        assert_eq!(registry.count().unwrap(), 0);
    }

    #[test]
    fn test_get_nonexistent() {
        let registry = DefinitionRegistry::new();
        let result = registry.get(&WorkflowDefinitionId::new("ghost"));
        assert!(matches!(
            result,
            Err(WorkflowError::DefinitionNotFound(_))
        ));
        assert!(!registry.contains(&WorkflowDefinitionId::new("ghost")).unwrap());
    }

    #[test]
    fn test_list() {
        let registry = DefinitionRegistry::new();
        registry.register(make_valid_definition("a")).unwrap();
        registry.register(make_valid_definition("b")).unwrap();
        assert_eq!(registry.list().unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_registration_of_same_id() {
        // Check-then-insert runs under one write lock: of N racers on one
        // id, exactly one wins.
        let registry = Arc::new(DefinitionRegistry::new());
        let barrier = Arc::new(std::sync::Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                std::thread::spawn(move || {
                    barrier.wait();
                    registry.register(make_valid_definition("doc")).is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert_eq!(registry.count().unwrap(), 1);
    }
}
