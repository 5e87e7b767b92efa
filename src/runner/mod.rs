//! The outer session loop
//!
//! This module provides:
//! - `TurnTrigger`: the abstraction over user intent (start-turn, direct
//!   text, quit), with stdin-backed and scripted implementations
//! - `SessionLoop`: the state machine that drives zero or more turns
//!   until termination

mod session_loop;
mod trigger;

pub use session_loop::{LoopState, SessionLoop};
pub use trigger::{ScriptedTrigger, StdinTrigger, TriggerEvent, TurnTrigger};
