//! Result types returned to callers of a build

pub mod schema;

pub use schema::{BuildRequest, BuildResult, ParsedArtifact};
