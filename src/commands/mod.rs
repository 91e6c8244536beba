//! Command layer: thin orchestration between the CLI and the workflow.

pub mod fetch;
pub mod run;
pub mod sample;
pub mod status;
