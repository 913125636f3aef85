//! Instance registry: live instances with per-instance locking
//!
//! The outer map is held only long enough to look up or insert a handle.
//! Each instance carries its own mutex, so transition application on one
//! instance id is serialized while distinct instances never contend.

use flowstate_types::{WorkflowError, WorkflowInstance, WorkflowInstanceId, WorkflowResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

/// A shared, individually-locked handle to a live instance
pub type InstanceHandle = Arc<Mutex<WorkflowInstance>>;

/// Registry of live workflow instances
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    /// All live instances, keyed by id
    instances: RwLock<HashMap<WorkflowInstanceId, InstanceHandle>>,
}

impl InstanceRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
        }
    }

    /// Store a freshly started instance and return its handle
    pub fn insert(&self, instance: WorkflowInstance) -> WorkflowResult<InstanceHandle> {
        let id = instance.id.clone();
        let handle = Arc::new(Mutex::new(instance));

        self.instances
            .write()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .insert(id.clone(), Arc::clone(&handle));

        tracing::debug!(instance_id = %id, "Workflow instance stored");
        Ok(handle)
    }

    /// Get the handle for an instance.
    ///
    /// Callers lock the handle themselves; holding it makes a
    /// read-modify-write on that instance atomic.
    pub fn get(&self, id: &WorkflowInstanceId) -> WorkflowResult<InstanceHandle> {
        self.instances
            .read()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .get(id)
            .cloned()
            .ok_or_else(|| WorkflowError::InstanceNotFound(id.clone()))
    }

    /// Clone the current value of an instance under its lock
    pub fn snapshot(&self, id: &WorkflowInstanceId) -> WorkflowResult<WorkflowInstance> {
        let handle = self.get(id)?;
        let guard = handle.lock().map_err(|_| WorkflowError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Total number of live instances
    pub fn count(&self) -> WorkflowResult<usize> {
        Ok(self
            .instances
            .read()
            .map_err(|_| WorkflowError::LockPoisoned)?
            .len())
    }
}
