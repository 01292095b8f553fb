//! Build Bridge - build lifecycle and status reporting for a pull-request CI bridge.
//!
//! This library sits between a pull-request hosting service and a job
//! execution engine: it triggers builds for pull-request activity and
//! reflects build state back onto the pull request via commit statuses and
//! comments, optionally closing failed pull requests automatically.

pub mod engine;
pub mod gateway;
pub mod github;
pub mod reporter;
pub mod server;
pub mod trigger;
pub mod types;
