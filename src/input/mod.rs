//! Keyboard translation and the between-ticks intent queue

pub mod handler;
pub mod queue;

pub use handler::{InputHandler, KeyAction};
pub use queue::IntentQueue;
