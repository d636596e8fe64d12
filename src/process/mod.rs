//! Child process execution for build commands
//!
//! - [`ProcessRunner`] spawns the composed command without waiting for it
//! - [`relay`] forwards stdout and stderr to the progress handler as lines arrive
//! - [`RunningBuild::wait`] is the single suspension point: it resolves when the
//!   child exits, whatever its exit code, or kills the child on cancellation
//!   or timeout

pub mod relay;
mod runner;

pub use runner::{ProcessExit, ProcessRunner, RunningBuild};
