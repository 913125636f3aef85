//! Flowstate engine
//!
//! The engine guarantees two invariants: a registered definition is
//! structurally sound, and every instance transition is legal with respect
//! to its definition. Everything a transport shell needs goes through
//! [`WorkflowService`], a small synchronous API over shared, lock-guarded
//! state.
//!
//! # Architecture
//!
//! [`WorkflowService`] composes specialized components:
//!
//! - [`validator`] — Pure structural checks, run once at registration
//! - [`TransitionEngine`] — Decides whether a requested action is legal
//!   and applies it
//! - [`DefinitionRegistry`] — Immutable-after-insert store of accepted
//!   definitions
//! - [`InstanceRegistry`] — Store of live instances with per-instance
//!   locking
//!
//! Validity is pushed as far left as possible: the validator does the
//! structural work at registration so the hot path re-checks only
//! instance-specific, time-varying conditions.
//!
//! # Example
//!
//! ```rust
//! use flowstate_engine::WorkflowService;
//! use flowstate_types::{Action, State, WorkflowDefinition};
//!
//! let service = WorkflowService::new();
//!
//! let def = WorkflowDefinition::new("doc")
//!     .with_state(State::initial("draft", "Draft"))
//!     .with_state(State::new("review", "Review"))
//!     .with_state(State::terminal("done", "Done"))
//!     .with_action(Action::new("submit", "Submit", "review").from_state("draft"))
//!     .with_action(Action::new("approve", "Approve", "done").from_state("review"));
//!
//! let def_id = service.create_workflow(def).unwrap();
//! let instance = service.start_instance(&def_id).unwrap();
//! let instance = service
//!     .execute_action(&instance.id, &flowstate_types::ActionId::new("submit"))
//!     .unwrap();
//! assert_eq!(instance.current_state.0, "review");
//! ```

#![deny(unsafe_code)]

pub mod definition_registry;
pub mod instance_registry;
pub mod service;
pub mod transition;
pub mod validator;

// Re-export main types
pub use definition_registry::DefinitionRegistry;
pub use instance_registry::InstanceRegistry;
pub use service::WorkflowService;
pub use transition::TransitionEngine;
