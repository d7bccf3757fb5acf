//! GitHub repository identity, git object model and API gateways.
//!
//! This module wraps Octocrab behind two small capability traits: one over
//! the git data API (refs, blobs, trees, commits, contents) and one over
//! issues. Errors are mapped into user-friendly variants so that callers can
//! surface precise failures without exposing Octocrab internals.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;

pub use error::GitHubError;
pub use gateway::{GitObjectGateway, IssueGateway, OctocrabRepositoryGateway};
pub use locator::{
    IssueNumber, PersonalAccessToken, RepositoryLocator, RepositoryName, RepositoryOwner,
};
pub use models::{EMPTY_TREE_SHA, FileMode, NewCommit, ObjectId, RefKind, RefName, TreeEntry};

#[cfg(test)]
pub use gateway::{MockGitObjectGateway, MockIssueGateway};
