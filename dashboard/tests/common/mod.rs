//! Common test utilities and infrastructure
//!
//! Shared fixtures and helpers used across the dashboard test suites.

#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

// Re-export commonly used items for convenience
pub use fixtures::TestFixtures;
pub use helpers::{DashboardBuilder, ScriptedApi, TestHelpers};
