//! CLI command implementations.

pub mod run;
pub mod setup;
pub mod version;
