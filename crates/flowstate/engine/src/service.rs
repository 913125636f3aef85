//! Workflow service: the synchronous API the transport shell calls
//!
//! One `WorkflowService` is constructed at process start and shared by
//! reference with whatever serves requests. It owns both registries and
//! the transition engine; every method takes `&self` and may be called
//! from any number of threads.
//!
//! Operations that return an instance return an owned snapshot taken
//! under the per-instance lock, never a live handle.

use crate::{DefinitionRegistry, InstanceRegistry, TransitionEngine};
use chrono::Utc;
use flowstate_types::{
    ActionId, WorkflowDefinition, WorkflowDefinitionId, WorkflowError, WorkflowInstance,
    WorkflowInstanceId, WorkflowResult,
};
use std::sync::Arc;

/// The workflow engine's public face
#[derive(Debug, Default)]
pub struct WorkflowService {
    definitions: DefinitionRegistry,
    instances: InstanceRegistry,
    engine: TransitionEngine,
}

impl WorkflowService {
    /// Create a service with empty registries
    pub fn new() -> Self {
        Self {
            definitions: DefinitionRegistry::new(),
            instances: InstanceRegistry::new(),
            engine: TransitionEngine::new(),
        }
    }

    // ── Definitions ──────────────────────────────────────────────────

    /// Validate and register a workflow definition
    pub fn create_workflow(
        &self,
        definition: WorkflowDefinition,
    ) -> WorkflowResult<WorkflowDefinitionId> {
        self.definitions.register(definition)
    }

    /// Fetch a registered definition by id
    pub fn get_workflow(
        &self,
        id: &WorkflowDefinitionId,
    ) -> WorkflowResult<Arc<WorkflowDefinition>> {
        self.definitions.get(id)
    }

    /// All registered definitions
    pub fn list_workflows(&self) -> WorkflowResult<Vec<Arc<WorkflowDefinition>>> {
        self.definitions.list()
    }

    /// Number of registered definitions
    pub fn workflow_count(&self) -> WorkflowResult<usize> {
        self.definitions.count()
    }

    // ── Instances ────────────────────────────────────────────────────

    /// Start a new instance of a registered workflow.
    ///
    /// The returned snapshot is positioned at the definition's initial
    /// state with empty history.
    pub fn start_instance(
        &self,
        workflow_id: &WorkflowDefinitionId,
    ) -> WorkflowResult<WorkflowInstance> {
        let definition = self.definitions.get(workflow_id)?;
        let instance = self.engine.start(&definition)?;
        let snapshot = instance.clone();

        self.instances.insert(instance)?;

        tracing::info!(
            instance_id = %snapshot.id,
            definition_id = %workflow_id,
            "Workflow instance started"
        );
        Ok(snapshot)
    }

    /// Apply an action to an instance.
    ///
    /// The read-modify-write runs under the instance's own lock, so
    /// concurrent calls against one instance are serialized; on success
    /// the returned snapshot reflects the applied transition.
    pub fn execute_action(
        &self,
        instance_id: &WorkflowInstanceId,
        action_id: &ActionId,
    ) -> WorkflowResult<WorkflowInstance> {
        let handle = self.instances.get(instance_id)?;
        let mut instance = handle.lock().map_err(|_| WorkflowError::LockPoisoned)?;

        let definition = self.definitions.get(&instance.definition_id)?;
        self.engine
            .apply(&mut instance, &definition, action_id, Utc::now())?;

        tracing::info!(
            instance_id = %instance_id,
            action_id = %action_id,
            state = %instance.current_state,
            "Action executed"
        );
        Ok(instance.clone())
    }

    /// Fetch the current state and history of an instance
    pub fn get_instance(&self, id: &WorkflowInstanceId) -> WorkflowResult<WorkflowInstance> {
        self.instances.snapshot(id)
    }

    /// Number of live instances
    pub fn instance_count(&self) -> WorkflowResult<usize> {
        self.instances.count()
    }
}
