//! Gateways for the GitHub git data and issues APIs.
//!
//! The protocol code only sees the traits defined here. The Octocrab
//! implementation handles real HTTP requests; tests substitute mocks or the
//! in-memory store.

mod client;
mod error_mapping;
mod git_data;
mod issues;

#[cfg(test)]
pub(crate) mod memory;


pub use git_data::OctocrabRepositoryGateway;

use async_trait::async_trait;

use crate::github::error::GitHubError;
use crate::github::locator::{IssueNumber, RepositoryLocator};
use crate::github::models::{NewCommit, ObjectId, RefName, TreeEntry};

/// Capability interface over the remote git object model.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitObjectGateway: Send + Sync {
    /// Resolve a reference to the commit it points at, or `None` when the
    /// reference does not exist.
    async fn get_ref(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
    ) -> Result<Option<ObjectId>, GitHubError>;

    /// Read a file from the tree at `reference`, or `None` when either the
    /// reference or the file is absent.
    async fn get_content(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
        path: &str,
    ) -> Result<Option<Vec<u8>>, GitHubError>;

    /// Resolve the root tree of a commit.
    async fn commit_tree(
        &self,
        repository: &RepositoryLocator,
        commit: &ObjectId,
    ) -> Result<ObjectId, GitHubError>;

    /// Store content as a blob.
    async fn create_blob(
        &self,
        repository: &RepositoryLocator,
        content: &[u8],
    ) -> Result<ObjectId, GitHubError>;

    /// Create a tree by overlaying `entries` onto `base_tree`.
    async fn create_tree(
        &self,
        repository: &RepositoryLocator,
        base_tree: &ObjectId,
        entries: &[TreeEntry],
    ) -> Result<ObjectId, GitHubError>;

    /// Create a commit object.
    async fn create_commit(
        &self,
        repository: &RepositoryLocator,
        commit: &NewCommit,
    ) -> Result<ObjectId, GitHubError>;

    /// Create a reference that does not exist yet.
    async fn create_ref(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
        target: &ObjectId,
    ) -> Result<(), GitHubError>;

    /// Move an existing reference, optionally without a fast-forward check.
    async fn update_ref(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
        target: &ObjectId,
        force: bool,
    ) -> Result<(), GitHubError>;
}

/// Gateway for reporting back to issues.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueGateway: Send + Sync {
    /// Post a comment on an issue.
    async fn create_comment(
        &self,
        repository: &RepositoryLocator,
        issue: IssueNumber,
        body: &str,
    ) -> Result<(), GitHubError>;

    /// Transition an issue to the closed state.
    async fn close_issue(
        &self,
        repository: &RepositoryLocator,
        issue: IssueNumber,
    ) -> Result<(), GitHubError>;
}
