//! The changeset autogeneration pipeline.
//!
//! [`operations::AutogenerateOperation`] resolves the workspace, inspects the
//! latest commit, classifies its message and writes a changeset unless one is
//! already pending. Every collaborator is injected through the traits in
//! [`traits`], with filesystem and libgit2 implementations in [`providers`].

pub mod classifier;
mod error;
pub mod operations;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use classifier::{Classification, CommitClassifier, FALLBACK_SUMMARY};
pub use error::{OperationError, Result};
