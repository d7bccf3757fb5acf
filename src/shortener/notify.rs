//! Reporting outcomes back on the originating issue.

use super::request::{RequestParseError, ShortLinkRequest};
use crate::github::{GitHubError, IssueGateway, IssueNumber, RepositoryLocator};

/// Comment posted once a short link has been published.
#[must_use]
pub fn confirmation_message(request: &ShortLinkRequest) -> String {
    format!(
        "Your shortlink has been created!\n\n{} now points to {}",
        request.entry.from, request.entry.to
    )
}

/// Comment posted when an issue could not be turned into a short link.
#[must_use]
pub fn rejection_message(error: &RequestParseError) -> String {
    format!(
        "Sorry, this issue could not be turned into a shortlink: {error}.\n\n\
         Put the target URL in the title or on the first line of the body, \
         optionally followed by the short path on the next line, then apply \
         the label again."
    )
}

/// Comments on and closes issues.
pub struct IssueNotifier<'a, Gateway>
where
    Gateway: IssueGateway,
{
    gateway: &'a Gateway,
    repository: &'a RepositoryLocator,
}

impl<'a, Gateway> IssueNotifier<'a, Gateway>
where
    Gateway: IssueGateway,
{
    /// Creates a notifier for issues in `repository`.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, repository: &'a RepositoryLocator) -> Self {
        Self {
            gateway,
            repository,
        }
    }

    /// Confirms a published link and closes its issue.
    ///
    /// # Errors
    ///
    /// Returns the gateway error from commenting or closing. The issue is
    /// not closed when the comment fails.
    pub async fn confirm(&self, request: &ShortLinkRequest) -> Result<(), GitHubError> {
        self.gateway
            .create_comment(
                self.repository,
                request.issue,
                &confirmation_message(request),
            )
            .await?;
        self.gateway
            .close_issue(self.repository, request.issue)
            .await?;
        tracing::info!("closed issue {}", request.issue);
        Ok(())
    }

    /// Explains on the issue why it was not processed. The issue stays open.
    ///
    /// # Errors
    ///
    /// Returns the gateway error from commenting.
    pub async fn report_rejection(
        &self,
        issue: IssueNumber,
        error: &RequestParseError,
    ) -> Result<(), GitHubError> {
        self.gateway
            .create_comment(self.repository, issue, &rejection_message(error))
            .await
    }
}
