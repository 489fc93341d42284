//! life-core: Conway's Game of Life simulation engine.
//!
//! The engine owns the grid and the stepping schedule. Everything that
//! draws cells or collects user input lives outside this crate and talks
//! to it through `Command` and `SimSnapshot`.

pub mod clock;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod rng;
pub mod scheduler;
pub mod snapshot;
pub mod step;
pub mod types;
