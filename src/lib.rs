pub mod api;
pub mod commands;
pub mod config;
pub mod criteria;
pub mod runtime;
pub mod workflow;
