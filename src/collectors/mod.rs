//! Collection tasks and the engine that runs them.
//!
//! ## Module Organization
//!
//! - [`task`]: the task abstraction, the [`Producer`](task::Producer) trait and
//!   the skip/failure error type
//! - [`classify`]: rules telling unavailable data apart from real failures
//! - [`command`], [`file`]: producers for external commands and host files
//! - [`postgres`]: database session, query producers and task builders
//! - [`system`]: host-level task builders
//! - [`runner`]: the sequential runner writing into the archive

pub mod classify;
pub mod command;
pub mod file;
pub mod postgres;
pub mod runner;
pub mod system;
pub mod task;
