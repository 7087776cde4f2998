//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the core expects from infrastructure.
//! They use only domain types: no reqwest, no axum.

pub mod completion;

pub use completion::{CompletionError, CompletionPort};
