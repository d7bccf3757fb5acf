//! Octocrab implementation of the issue gateway.

use async_trait::async_trait;

use crate::github::error::GitHubError;
use crate::github::locator::{IssueNumber, RepositoryLocator};
use crate::github::models::{ApiComment, ApiIssue, CreateCommentRequest, UpdateIssueRequest};

use super::IssueGateway;
use super::error_mapping::map_octocrab_error;
use super::git_data::OctocrabRepositoryGateway;

#[async_trait]
impl IssueGateway for OctocrabRepositoryGateway {
    async fn create_comment(
        &self,
        repository: &RepositoryLocator,
        issue: IssueNumber,
        body: &str,
    ) -> Result<(), GitHubError> {
        let request = CreateCommentRequest { body };
        let comment = self
            .client
            .post::<_, ApiComment>(repository.issue_comments_path(issue), Some(&request))
            .await
            .map_err(|error| map_octocrab_error("create comment", &error))?;
        tracing::debug!("posted comment {} on issue {issue}", comment.id);
        Ok(())
    }

    async fn close_issue(
        &self,
        repository: &RepositoryLocator,
        issue: IssueNumber,
    ) -> Result<(), GitHubError> {
        let request = UpdateIssueRequest { state: "closed" };
        let updated = self
            .client
            .patch::<ApiIssue, _, _>(repository.issue_path(issue), Some(&request))
            .await
            .map_err(|error| map_octocrab_error("close issue", &error))?;
        tracing::debug!("issue #{} is now {}", updated.number, updated.state);
        Ok(())
    }
}
