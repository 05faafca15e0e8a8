#![warn(clippy::missing_docs_in_private_items)]

//! A small client for the job api of an octoprint-compatible print server. The
//! interesting parts live in the `tracker` module, which combines the typed job
//! records with the command dispatch and the push-update fan-out.

/// Command payloads sent to the job api and the classification of their outcome.
pub mod command;

/// Runtime configuration for reaching the print server.
pub mod config;

/// The http seam between the tracker and the print server.
pub mod connection;

/// Error types shared across the crate.
pub mod error;

/// Typed records parsed from the job api's json responses.
pub mod job;

/// The job tracker facade and its watcher registries.
pub mod tracker;
