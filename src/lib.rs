//! Dokku plugin that manages one ArangoDB service container per application.
//!
//! The `commands` binary speaks the Dokku plugin protocol: it receives a
//! colon-form subcommand as its first argument, drives Docker and the Dokku
//! CLI through the [`engine`] and [`orchestrator`] seams, and prints
//! human-readable results on stdout. Diagnostics go to stderr so Dokku can
//! relay plugin output untouched.

pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod orchestrator;
pub mod service;
