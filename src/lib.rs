//! Hamiltonian snake - an autopilot that fills the whole grid
//!
//! This library provides:
//! - Cycle construction and shortcut planning (planner module)
//! - Run state and the tick engine (game module)
//! - TUI rendering and keyboard controls (render, input modules)
//! - Watch and headless simulation modes (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod planner;
pub mod render;
