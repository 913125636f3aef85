//! Workflow definitions: states and the guarded actions between them
//!
//! A WorkflowDefinition is plain data until it is registered. The engine's
//! validator checks it for structural integrity exactly once; after a
//! successful registration it is never modified. Replacing a definition
//! means registering a new one under a new id.

use serde::{Deserialize, Serialize};

// ── Identifiers ──────────────────────────────────────────────────────

/// Unique identifier for a workflow definition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowDefinitionId(pub String);

impl WorkflowDefinitionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Display for WorkflowDefinitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a state within a definition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateId(pub String);

impl StateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an action within a definition
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub String);

impl ActionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for ActionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── State ────────────────────────────────────────────────────────────

/// A state in a workflow definition
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct State {
    /// Unique identifier within the definition
    pub id: StateId,
    /// Human-readable name
    pub name: String,
    /// Whether new instances start here; exactly one per definition
    #[serde(default)]
    pub is_initial: bool,
    /// Whether this state admits no outgoing actions
    #[serde(default)]
    pub is_final: bool,
    /// Whether the state is currently usable
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl State {
    /// Create an ordinary (non-initial, non-final) state
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StateId::new(id),
            name: name.into(),
            is_initial: false,
            is_final: false,
            enabled: true,
        }
    }

    /// Create an initial state
    pub fn initial(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_initial: true,
            ..Self::new(id, name)
        }
    }

    /// Create a final state
    pub fn terminal(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_final: true,
            ..Self::new(id, name)
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

// ── Action ───────────────────────────────────────────────────────────

/// A guarded transition: from one of several allowed source states to
/// exactly one target state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier within the definition
    pub id: ActionId,
    /// Human-readable name
    pub name: String,
    /// States this action may be applied from
    pub from_states: Vec<StateId>,
    /// The state an instance moves to when this action is applied
    pub to_state: StateId,
    /// Whether the action may currently be executed
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Action {
    /// Create an action with no source states; add them with
    /// [`Action::from_state`]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        to_state: impl Into<String>,
    ) -> Self {
        Self {
            id: ActionId::new(id),
            name: name.into(),
            from_states: Vec::new(),
            to_state: StateId::new(to_state),
            enabled: true,
        }
    }

    /// Add an allowed source state
    pub fn from_state(mut self, state: impl Into<String>) -> Self {
        self.from_states.push(StateId::new(state));
        self
    }

    /// Mark the action as not currently executable
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Check whether the action may be applied from the given state
    pub fn applies_from(&self, state: &StateId) -> bool {
        self.from_states.contains(state)
    }
}

// ── Workflow Definition ──────────────────────────────────────────────

/// The static description of a workflow: its states and legal actions.
///
/// Construction never validates — a definition may be structurally broken
/// until the engine's validator accepts it at registration time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Unique identifier
    pub id: WorkflowDefinitionId,
    /// All states, in declaration order
    pub states: Vec<State>,
    /// All actions, in declaration order
    pub actions: Vec<Action>,
}

impl WorkflowDefinition {
    /// Create an empty definition with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: WorkflowDefinitionId::new(id),
            states: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_state(mut self, state: State) -> Self {
        self.states.push(state);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// The unique initial state, if the definition declares exactly one.
    ///
    /// Returns the first match; the validator rejects definitions where
    /// this is ambiguous.
    pub fn initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_initial)
    }

    /// All final states
    pub fn final_states(&self) -> Vec<&State> {
        self.states.iter().filter(|s| s.is_final).collect()
    }

    /// Look up a state by id
    pub fn get_state(&self, id: &StateId) -> Option<&State> {
        self.states.iter().find(|s| &s.id == id)
    }

    /// Look up an action by id
    pub fn get_action(&self, id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|a| &a.id == id)
    }

    /// Actions applicable from the given state (ignoring enablement)
    pub fn actions_from(&self, state: &StateId) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.applies_from(state))
            .collect()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_doc_definition() -> WorkflowDefinition {
        WorkflowDefinition::new("doc")
            .with_state(State::initial("draft", "Draft"))
            .with_state(State::new("review", "Review"))
            .with_state(State::terminal("done", "Done"))
            .with_action(Action::new("submit", "Submit", "review").from_state("draft"))
            .with_action(Action::new("approve", "Approve", "done").from_state("review"))
    }

    #[test]
    fn test_build_definition() {
        let def = make_doc_definition();
        assert_eq!(def.state_count(), 3);
        assert_eq!(def.action_count(), 2);
        assert_eq!(def.initial_state().unwrap().id, StateId::new("draft"));
        assert_eq!(def.final_states().len(), 1);
    }

    #[test]
    fn test_state_constructors() {
        let draft = State::initial("draft", "Draft");
        assert!(draft.is_initial);
        assert!(!draft.is_final);
        assert!(draft.enabled);

        let done = State::terminal("done", "Done");
        assert!(done.is_final);
        assert!(!done.is_initial);

        let off = State::new("archived", "Archived").with_enabled(false);
        assert!(!off.enabled);
    }

    #[test]
    fn test_action_applies_from() {
        let action = Action::new("reject", "Reject", "draft")
            .from_state("review")
            .from_state("done");
        assert!(action.applies_from(&StateId::new("review")));
        assert!(action.applies_from(&StateId::new("done")));
        assert!(!action.applies_from(&StateId::new("draft")));
    }

    #[test]
    fn test_disabled_action() {
        let action = Action::new("submit", "Submit", "review")
            .from_state("draft")
            .disabled();
        assert!(!action.enabled);
    }

    #[test]
    fn test_lookups() {
        let def = make_doc_definition();
        assert!(def.get_state(&StateId::new("review")).is_some());
        assert!(def.get_state(&StateId::new("missing")).is_none());
        assert!(def.get_action(&ActionId::new("approve")).is_some());
        assert!(def.get_action(&ActionId::new("missing")).is_none());

        let from_draft = def.actions_from(&StateId::new("draft"));
        assert_eq!(from_draft.len(), 1);
        assert_eq!(from_draft[0].id, ActionId::new("submit"));
    }

    #[test]
    fn test_definition_id() {
        let generated = WorkflowDefinitionId::generate();
        assert!(!generated.is_empty());

        let named = WorkflowDefinitionId::new("my-workflow");
        assert_eq!(format!("{}", named), "my-workflow");

        let blank = WorkflowDefinitionId::new("   ");
        assert!(blank.is_empty());
    }

    #[test]
    fn test_deserialize_transport_json() {
        // The shape a transport shell posts as a definition.
        let json = r#"{
            "id": "doc",
            "states": [
                {"id": "draft", "name": "Draft", "is_initial": true},
                {"id": "review", "name": "Review"},
                {"id": "done", "name": "Done", "is_final": true}
            ],
            "actions": [
                {"id": "submit", "name": "Submit", "from_states": ["draft"], "to_state": "review"},
                {"id": "approve", "name": "Approve", "from_states": ["review"], "to_state": "done"}
            ]
        }"#;

        let def: WorkflowDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.id, WorkflowDefinitionId::new("doc"));
        assert_eq!(def.state_count(), 3);
        // Omitted `enabled` defaults to true on both states and actions.
        assert!(def.states.iter().all(|s| s.enabled));
        assert!(def.actions.iter().all(|a| a.enabled));
        assert_eq!(def.initial_state().unwrap().id, StateId::new("draft"));
    }
}
