//! Octocrab implementation of the git data gateway.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use octocrab::Octocrab;

use crate::github::error::GitHubError;
use crate::github::locator::{PersonalAccessToken, RepositoryLocator};
use crate::github::models::{
    ApiCommit, ApiContent, ApiObject, ApiRef, ApiTreeEntry, ContentQuery, CreateBlobRequest,
    CreateCommitRequest, CreateRefRequest, CreateTreeRequest, NewCommit, ObjectId, RefName,
    TreeEntry, UpdateRefRequest,
};

use super::GitObjectGateway;
use super::client::build_octocrab_client;
use super::error_mapping::{is_absent, map_octocrab_error};

/// Octocrab-backed gateway for one GitHub API host.
pub struct OctocrabRepositoryGateway {
    pub(super) client: Octocrab,
}

impl OctocrabRepositoryGateway {
    /// Creates a new gateway from an Octocrab client.
    #[must_use]
    pub const fn new(client: Octocrab) -> Self {
        Self { client }
    }

    /// Builds an Octocrab client for the given token and the locator's API
    /// base.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidUrl` when the base URI cannot be parsed or
    /// `GitHubError::Api` when Octocrab fails to construct a client.
    pub fn for_token(
        token: &PersonalAccessToken,
        locator: &RepositoryLocator,
    ) -> Result<Self, GitHubError> {
        let octocrab = build_octocrab_client(token, locator.api_base().as_str())?;
        Ok(Self::new(octocrab))
    }
}

fn decode_content(content: ApiContent) -> Result<Vec<u8>, GitHubError> {
    match (content.encoding.as_deref(), content.content) {
        (Some("base64"), Some(encoded)) => {
            let compact: String = encoded.split_whitespace().collect();
            STANDARD
                .decode(compact)
                .map_err(|error| GitHubError::Api {
                    message: format!("content is not valid base64: {error}"),
                })
        }
        (Some("utf-8") | None, Some(text)) => Ok(text.into_bytes()),
        (encoding, _) => Err(GitHubError::Api {
            message: format!(
                "content returned with unsupported encoding {}",
                encoding.unwrap_or("<none>")
            ),
        }),
    }
}

#[async_trait]
impl GitObjectGateway for OctocrabRepositoryGateway {
    async fn get_ref(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
    ) -> Result<Option<ObjectId>, GitHubError> {
        match self
            .client
            .get::<ApiRef, _, _>(repository.ref_path(&reference.short()), None::<&()>)
            .await
        {
            Ok(found) => Ok(Some(found.object.sha)),
            Err(error) if is_absent(&error) => Ok(None),
            Err(error) => Err(map_octocrab_error("get ref", &error)),
        }
    }

    async fn get_content(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
        path: &str,
    ) -> Result<Option<Vec<u8>>, GitHubError> {
        let query = ContentQuery {
            reference: reference.name(),
        };
        match self
            .client
            .get::<ApiContent, _, _>(repository.contents_path(path), Some(&query))
            .await
        {
            Ok(content) => decode_content(content).map(Some),
            Err(error) if is_absent(&error) => Ok(None),
            Err(error) => Err(map_octocrab_error("get content", &error)),
        }
    }

    async fn commit_tree(
        &self,
        repository: &RepositoryLocator,
        commit: &ObjectId,
    ) -> Result<ObjectId, GitHubError> {
        self.client
            .get::<ApiCommit, _, _>(repository.commit_path(commit.as_str()), None::<&()>)
            .await
            .map(|found| {
                tracing::debug!("commit {} has tree {}", found.sha, found.tree.sha);
                found.tree.sha
            })
            .map_err(|error| map_octocrab_error("get commit", &error))
    }

    async fn create_blob(
        &self,
        repository: &RepositoryLocator,
        content: &[u8],
    ) -> Result<ObjectId, GitHubError> {
        let request = CreateBlobRequest {
            content: STANDARD.encode(content),
            encoding: "base64",
        };
        self.client
            .post::<_, ApiObject>(repository.blobs_path(), Some(&request))
            .await
            .map(|blob| blob.sha)
            .map_err(|error| map_octocrab_error("create blob", &error))
    }

    async fn create_tree(
        &self,
        repository: &RepositoryLocator,
        base_tree: &ObjectId,
        entries: &[TreeEntry],
    ) -> Result<ObjectId, GitHubError> {
        let request = CreateTreeRequest {
            base_tree: base_tree.as_str(),
            tree: entries.iter().map(ApiTreeEntry::from).collect(),
        };
        self.client
            .post::<_, ApiObject>(repository.trees_path(), Some(&request))
            .await
            .map(|tree| tree.sha)
            .map_err(|error| map_octocrab_error("create tree", &error))
    }

    async fn create_commit(
        &self,
        repository: &RepositoryLocator,
        commit: &NewCommit,
    ) -> Result<ObjectId, GitHubError> {
        let request = CreateCommitRequest {
            message: commit.message.as_str(),
            tree: commit.tree.as_str(),
            parents: commit.parents.iter().map(ObjectId::as_str).collect(),
        };
        self.client
            .post::<_, ApiObject>(repository.commits_path(), Some(&request))
            .await
            .map(|created| created.sha)
            .map_err(|error| map_octocrab_error("create commit", &error))
    }

    async fn create_ref(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
        target: &ObjectId,
    ) -> Result<(), GitHubError> {
        let request = CreateRefRequest {
            reference: reference.qualified(),
            sha: target.as_str(),
        };
        self.client
            .post::<_, ApiRef>(repository.refs_path(), Some(&request))
            .await
            .map(|_| ())
            .map_err(|error| map_octocrab_error("create ref", &error))
    }

    async fn update_ref(
        &self,
        repository: &RepositoryLocator,
        reference: &RefName,
        target: &ObjectId,
        force: bool,
    ) -> Result<(), GitHubError> {
        let request = UpdateRefRequest {
            sha: target.as_str(),
            force,
        };
        self.client
            .patch::<ApiRef, _, _>(repository.update_ref_path(&reference.short()), Some(&request))
            .await
            .map(|_| ())
            .map_err(|error| map_octocrab_error("update ref", &error))
    }
}
