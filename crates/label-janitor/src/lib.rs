//! Finds Linear issue labels that no issue uses and, behind a dry-run and
//! confirmation gate, deletes them.
//!
//! This crate provides:
//! - Environment-driven run configuration
//! - A GraphQL client for the Linear label operations
//! - Cursor pagination over the label connection
//! - Selection of unused labels and the interactive deletion gate

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Every API call can fail

pub mod client;
pub mod config;
pub mod confirm;
pub mod error;
pub mod filter;
pub mod janitor;
pub mod models;
pub mod pagination;
pub mod ui;

pub use client::{LabelApi, LinearClient};
pub use config::Config;
pub use confirm::{Confirm, ScriptedConfirm, StdinConfirm};
pub use error::{JanitorError, Result};
pub use filter::select_unused;
pub use janitor::{run, DeletionFailure, DeletionSummary, Outcome};
pub use models::*;
