//! Power Snake - a terminal Snake game with timed power-ups
//!
//! This library provides:
//! - Core game logic on a wrap-around grid (game module)
//! - Keyboard translation and the intent queue (input module)
//! - TUI rendering from read-only snapshots (render module)
//! - Interactive and headless execution modes (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
