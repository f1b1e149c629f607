//! Core state and tick logic for the autopilot snake
//!
//! This module holds the run state, its configuration and the engine that
//! applies one planned move per tick. It has no I/O or rendering dependencies,
//! so the terminal UI and the headless simulator drive it the same way.

pub mod config;
pub mod direction;
pub mod engine;
pub mod error;
pub mod state;
pub mod target;

// Re-export commonly used types
pub use config::{validate_grid_size, GameConfig};
pub use direction::Direction;
pub use engine::{GameEngine, StepResult};
pub use error::NavError;
pub use state::{initialize, AgentState, Cell, RunState};
pub use target::{RandomTargets, ScriptedTargets, TargetSource};
