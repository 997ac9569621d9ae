//! Core domain models
//!
//! This module defines the data structures that represent check pipelines,
//! their steps, and the outcomes of running them.

pub mod config;
pub mod pipeline;
pub mod state;
pub mod step;

pub use pipeline::*;
pub use state::*;
pub use step::*;
