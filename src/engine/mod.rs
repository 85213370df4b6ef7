// src/engine/mod.rs

//! Interactive mutation surface.
//!
//! [`ScheduleEngine`] owns one project's milestone sequence. Every mutation
//! runs the same cycle on a scratch copy:
//!
//! 1. apply the edit (validating it, cascading when enabled),
//! 2. run the forward pass,
//! 3. re-evaluate conflicts,
//!
//! and only then replaces the committed sequence. A rejected edit leaves the
//! engine exactly as it was.

pub mod core;
pub mod edits;
pub mod step;

pub use self::core::ScheduleEngine;
pub use step::{Advisory, EngineStep};
