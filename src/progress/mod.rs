//! Progress reporting for build invocations
//!
//! The orchestrator never writes to a global logger directly; it reports
//! every event, including relayed child output, to the [`ProgressHandler`]
//! it was constructed with.

mod handler;
mod logging;
mod recording;

pub use handler::{NoOpHandler, OutputStream, ProgressEvent, ProgressHandler};
pub use logging::LoggingHandler;
pub use recording::RecordingHandler;
