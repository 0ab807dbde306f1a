//! Shared types for the contract evaluation dashboard
//!
//! Contains the evaluation data model consumed from the backend, the shared
//! error type, and logging utilities used by every dashboard component.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
