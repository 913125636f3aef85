//! Flowstate domain types
//!
//! Flowstate workflows are guarded finite-state machines: a definition
//! declares a set of states and a set of actions, where each action is a
//! named transition from one of several allowed source states to exactly
//! one target state.
//!
//! # Key Concepts
//!
//! - **WorkflowDefinition**: The static blueprint — states plus actions.
//!   Plain data until registration; the engine validates it once, then it
//!   is immutable.
//! - **WorkflowInstance**: One running execution of a definition, with its
//!   own current state and an append-only history of applied actions.
//! - **HistoryEntry**: A named record of one applied action and when it
//!   was applied.
//! - **WorkflowError**: The shared error taxonomy — validation, not-found,
//!   and transition failures — with a [`WorkflowError::kind`] classifier so
//!   callers branch on kind rather than message text.
//!
//! # Design Principles
//!
//! 1. Definitions are validated once, at registration. The hot transition
//!    path re-checks only instance-specific, time-varying conditions.
//! 2. A rejected operation leaves all state exactly as it was; the single
//!    mutation happens only after every check has passed.
//! 3. Instances reference their definition by id and never copy it.

#![deny(unsafe_code)]

mod definition;
mod errors;
mod instance;

pub use definition::*;
pub use errors::*;
pub use instance::*;
