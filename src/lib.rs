//! # checkpoint-sweep
//!
//! Finds the newest model-checkpoint run directories under a base directory
//! and hands each one to a deletion program, plus `checkpoint-prune`, the
//! default deletion program, which thins the saved model files of one run.
//!
//! ## Modules
//!
//! - [`checkpoint`] — Run directory naming, locating, and selection
//! - [`sweep`] — Deleter trait, external command invocation, sweep loop
//! - [`prune`] — Model file scan, three-phase retention, cleanup record
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types
//! - [`logging`] — `tracing` subscriber setup for the binaries

pub mod checkpoint;
pub mod config;
pub mod error;
pub mod logging;
pub mod prune;
pub mod sweep;
