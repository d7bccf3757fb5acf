//! Atomic publication of a set of files as one revision on a named pointer.
//!
//! A publish stores every artifact as a blob, overlays them on the tree of
//! the pointer's current revision, records a commit whose parent is that
//! revision, and finally moves the pointer. Paths not named by an artifact
//! are carried over untouched. Nothing becomes visible until the last step,
//! so a failure part-way leaves the pointer where it was.

use std::fmt;

use thiserror::Error;

use crate::github::{
    FileMode, GitHubError, GitObjectGateway, NewCommit, ObjectId, RefName, RepositoryLocator,
    TreeEntry,
};


/// A file to place in the published tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Slash-separated path relative to the tree root.
    pub path: String,
    /// Raw file content.
    pub content: Vec<u8>,
    /// File mode; regular unless stated otherwise.
    pub mode: FileMode,
}

impl Artifact {
    /// A regular file at `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            mode: FileMode::Regular,
        }
    }
}

/// Step of a publish that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishStage {
    /// Reading the pointer's current target.
    ResolvePointer,
    /// Reading the tree of the current revision.
    ResolveBaseTree,
    /// Storing an artifact as a blob.
    StoreBlob,
    /// Building the overlay tree.
    BuildTree,
    /// Recording the commit.
    CreateRevision,
    /// Creating or moving the pointer.
    MovePointer,
}

impl fmt::Display for PublishStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::ResolvePointer => "resolve pointer",
            Self::ResolveBaseTree => "resolve base tree",
            Self::StoreBlob => "store blob",
            Self::BuildTree => "build tree",
            Self::CreateRevision => "create revision",
            Self::MovePointer => "move pointer",
        };
        f.write_str(label)
    }
}

/// A publish step was rejected by the remote.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("publish failed at {stage}: {source}")]
pub struct PublishError {
    /// Step that failed.
    pub stage: PublishStage,
    /// Underlying gateway failure.
    pub source: GitHubError,
}

impl PublishError {
    fn at(stage: PublishStage) -> impl FnOnce(GitHubError) -> Self {
        move |source| Self { stage, source }
    }
}

/// Outcome of a successful publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRevision {
    /// The new commit.
    pub commit: ObjectId,
    /// Root tree of the new commit.
    pub tree: ObjectId,
    /// Previous revision, `None` for a root commit.
    pub parent: Option<ObjectId>,
    /// Whether the pointer was created rather than moved.
    pub pointer_created: bool,
}

/// Writes revisions through a [`GitObjectGateway`].
pub struct Publisher<'a, Gateway>
where
    Gateway: GitObjectGateway,
{
    gateway: &'a Gateway,
    repository: &'a RepositoryLocator,
}

impl<'a, Gateway> Publisher<'a, Gateway>
where
    Gateway: GitObjectGateway,
{
    /// Creates a publisher for `repository`.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, repository: &'a RepositoryLocator) -> Self {
        Self {
            gateway,
            repository,
        }
    }

    /// Records `artifacts` as a commit on top of `parent` without moving
    /// any pointer. Returns the commit and its tree.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] naming the first step the remote rejected.
    pub async fn write_revision(
        &self,
        parent: Option<&ObjectId>,
        artifacts: &[Artifact],
        message: &str,
    ) -> Result<(ObjectId, ObjectId), PublishError> {
        let base_tree = match parent {
            Some(commit) => self
                .gateway
                .commit_tree(self.repository, commit)
                .await
                .map_err(PublishError::at(PublishStage::ResolveBaseTree))?,
            None => ObjectId::empty_tree(),
        };

        let mut entries = Vec::with_capacity(artifacts.len());
        for artifact in artifacts {
            let blob = self
                .gateway
                .create_blob(self.repository, &artifact.content)
                .await
                .map_err(PublishError::at(PublishStage::StoreBlob))?;
            tracing::debug!("stored {} as blob {blob}", artifact.path);
            entries.push(TreeEntry {
                path: artifact.path.clone(),
                mode: artifact.mode,
                blob,
            });
        }

        let tree = self
            .gateway
            .create_tree(self.repository, &base_tree, &entries)
            .await
            .map_err(PublishError::at(PublishStage::BuildTree))?;

        let commit = NewCommit {
            message: message.to_owned(),
            tree: tree.clone(),
            parents: parent.into_iter().cloned().collect(),
        };
        let sha = self
            .gateway
            .create_commit(self.repository, &commit)
            .await
            .map_err(PublishError::at(PublishStage::CreateRevision))?;
        tracing::info!("created commit {sha} with tree {tree}");

        Ok((sha, tree))
    }

    /// Points `reference` at `target`, creating it when `exists` is false
    /// and force-updating it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] at [`PublishStage::MovePointer`].
    pub async fn create_or_update_ref(
        &self,
        reference: &RefName,
        target: &ObjectId,
        exists: bool,
    ) -> Result<(), PublishError> {
        let result = if exists {
            self.gateway
                .update_ref(self.repository, reference, target, true)
                .await
        } else {
            self.gateway
                .create_ref(self.repository, reference, target)
                .await
        };
        result.map_err(PublishError::at(PublishStage::MovePointer))?;

        let verb = if exists { "updated" } else { "created" };
        tracing::info!("{verb} {reference} -> {target}");
        Ok(())
    }

    /// Publishes `artifacts` as the next revision of `pointer`.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] naming the failed step. The pointer only
    /// moves once every object has been written.
    pub async fn publish(
        &self,
        pointer: &RefName,
        artifacts: &[Artifact],
        message: &str,
    ) -> Result<PublishedRevision, PublishError> {
        let parent = self
            .gateway
            .get_ref(self.repository, pointer)
            .await
            .map_err(PublishError::at(PublishStage::ResolvePointer))?;

        let (commit, tree) = self
            .write_revision(parent.as_ref(), artifacts, message)
            .await?;
        self.create_or_update_ref(pointer, &commit, parent.is_some())
            .await?;

        Ok(PublishedRevision {
            commit,
            tree,
            pointer_created: parent.is_none(),
            parent,
        })
    }
}
