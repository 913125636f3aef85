//! Workflow instances: running executions of a definition
//!
//! An instance tracks one execution: its current state and the ordered
//! history of actions applied to it. `current_state` is mutated only by
//! the transition engine, and only after every legality check has passed;
//! `history` is append-only.

use crate::{ActionId, StateId, WorkflowDefinitionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Instance Identifier ──────────────────────────────────────────────

/// Unique identifier for a workflow instance
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowInstanceId(pub String);

impl WorkflowInstanceId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn short(&self) -> &str {
        &self.0[..8.min(self.0.len())]
    }
}

impl std::fmt::Display for WorkflowInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── History ──────────────────────────────────────────────────────────

/// One applied action in an instance's history
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The action that was applied
    pub action_id: ActionId,
    /// When it was applied
    pub at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(action_id: ActionId, at: DateTime<Utc>) -> Self {
        Self { action_id, at }
    }
}

// ── Workflow Instance ────────────────────────────────────────────────

/// A running instance of a workflow definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowInstance {
    /// Unique instance identifier (generated)
    pub id: WorkflowInstanceId,
    /// The definition this instance was started from
    pub definition_id: WorkflowDefinitionId,
    /// The state the instance is currently in
    pub current_state: StateId,
    /// Ordered, append-only record of applied actions
    pub history: Vec<HistoryEntry>,
    /// When the instance was started
    pub created_at: DateTime<Utc>,
    /// When the instance last transitioned
    pub updated_at: DateTime<Utc>,
}

impl WorkflowInstance {
    /// Create a fresh instance in the given initial state with empty
    /// history
    pub fn new(definition_id: WorkflowDefinitionId, initial_state: StateId) -> Self {
        let now = Utc::now();
        Self {
            id: WorkflowInstanceId::generate(),
            definition_id,
            current_state: initial_state,
            history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a transition: move to `to_state` and record the action.
    ///
    /// This is the instance's single mutation point, invoked by the
    /// transition engine once a requested action has passed every check.
    pub fn advance(&mut self, action_id: ActionId, to_state: StateId, at: DateTime<Utc>) {
        self.current_state = to_state;
        self.history.push(HistoryEntry::new(action_id, at));
        self.updated_at = at;
    }

    /// Check whether the instance is currently in the given state
    pub fn is_in(&self, state: &StateId) -> bool {
        &self.current_state == state
    }

    /// The most recently applied action, if any
    pub fn last_action(&self) -> Option<&ActionId> {
        self.history.last().map(|entry| &entry.action_id)
    }

    /// Number of actions applied so far
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_instance() -> WorkflowInstance {
        WorkflowInstance::new(WorkflowDefinitionId::new("doc"), StateId::new("draft"))
    }

    #[test]
    fn test_fresh_instance() {
        let inst = make_instance();
        assert!(inst.is_in(&StateId::new("draft")));
        assert_eq!(inst.history_len(), 0);
        assert!(inst.last_action().is_none());
        assert_eq!(inst.created_at, inst.updated_at);
    }

    #[test]
    fn test_advance_appends_history() {
        let mut inst = make_instance();
        let now = Utc::now();

        inst.advance(ActionId::new("submit"), StateId::new("review"), now);

        assert!(inst.is_in(&StateId::new("review")));
        assert_eq!(inst.history_len(), 1);
        assert_eq!(inst.last_action(), Some(&ActionId::new("submit")));
        assert_eq!(inst.history[0], HistoryEntry::new(ActionId::new("submit"), now));
        assert_eq!(inst.updated_at, now);
    }

    #[test]
    fn test_history_ordering() {
        let mut inst = make_instance();
        let t1 = Utc::now();
        let t2 = t1 + chrono::Duration::seconds(5);

        inst.advance(ActionId::new("submit"), StateId::new("review"), t1);
        inst.advance(ActionId::new("approve"), StateId::new("done"), t2);

        assert_eq!(inst.history_len(), 2);
        assert_eq!(inst.history[0].action_id, ActionId::new("submit"));
        assert_eq!(inst.history[1].action_id, ActionId::new("approve"));
        assert!(inst.history[0].at < inst.history[1].at);
    }

    #[test]
    fn test_instance_id() {
        let id = WorkflowInstanceId::generate();
        assert!(!id.0.is_empty());
        assert!(id.short().len() <= 8);

        let a = make_instance();
        let b = make_instance();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut inst = make_instance();
        inst.advance(ActionId::new("submit"), StateId::new("review"), Utc::now());

        let json = serde_json::to_string(&inst).unwrap();
        let back: WorkflowInstance = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, inst.id);
        assert_eq!(back.current_state, inst.current_state);
        assert_eq!(back.history, inst.history);
    }
}
