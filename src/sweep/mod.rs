//! Handing located checkpoint runs to the deletion program, one at a time.

pub mod deleter;
pub mod sweeper;

pub use deleter::{CommandDeleter, DeleteOutcome, Deleter};
pub use sweeper::{Invocation, InvocationStatus, SweepReport, Sweeper};
