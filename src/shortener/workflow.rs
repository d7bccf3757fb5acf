//! End-to-end handling of one `issues` event.

use super::entry::SiteBase;
use super::error::ShortenError;
use super::index::IndexStore;
use super::notify::IssueNotifier;
use super::request::{RequestParseError, RequestParser, ShortLinkRequest};
use super::site::SiteRenderer;
use super::slug::SlugCodec;
use crate::event::{IgnoreReason, IssuesEvent};
use crate::github::{GitObjectGateway, IssueGateway, IssueNumber, RefName, RepositoryLocator};
use crate::publish::{PublishedRevision, Publisher};

/// Inputs that shape how issues are turned into links.
#[derive(Debug, Clone)]
pub struct ShortenSettings {
    /// Label whose application triggers the protocol.
    pub label: String,
    /// Branch the site is published on.
    pub pages_branch: RefName,
    /// Codec for generated short paths.
    pub slugs: SlugCodec,
}

impl Default for ShortenSettings {
    fn default() -> Self {
        Self {
            label: "shorten".to_owned(),
            pages_branch: RefName::branch("gh-pages"),
            slugs: SlugCodec::default(),
        }
    }
}

/// What a run did with its event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// The event was not a trigger.
    Ignored(IgnoreReason),
    /// The link was published and the issue closed.
    Published {
        /// The accepted request.
        request: ShortLinkRequest,
        /// The new site revision.
        revision: PublishedRevision,
    },
}

/// Turns labelled issues into published short links.
pub struct ShortenWorkflow<'a, Gateway>
where
    Gateway: GitObjectGateway + IssueGateway,
{
    gateway: &'a Gateway,
    repository: &'a RepositoryLocator,
    settings: ShortenSettings,
}

impl<'a, Gateway> ShortenWorkflow<'a, Gateway>
where
    Gateway: GitObjectGateway + IssueGateway,
{
    /// Creates a workflow acting on `repository`.
    #[must_use]
    pub const fn new(
        gateway: &'a Gateway,
        repository: &'a RepositoryLocator,
        settings: ShortenSettings,
    ) -> Self {
        Self {
            gateway,
            repository,
            settings,
        }
    }

    /// Handles one event: parse, merge, render, publish, notify.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError`] for the first step that failed. A parse
    /// failure is explained on the issue before it is returned.
    pub async fn handle(&self, event: &IssuesEvent) -> Result<ShortenOutcome, ShortenError> {
        let issue = match event.trigger(&self.settings.label) {
            Ok(issue) => issue,
            Err(reason) => {
                tracing::debug!("ignoring event for issue #{}: {reason}", event.issue.number);
                return Ok(ShortenOutcome::Ignored(reason));
            }
        };

        let site = SiteBase::for_repository(self.repository).map_err(ShortenError::InvalidSite)?;
        let parser = RequestParser::new(&site, &self.settings.slugs);
        let request = match parser.parse(issue) {
            Ok(request) => request,
            Err(error) => {
                self.reject(IssueNumber::new(issue.number), &error).await;
                return Err(error.into());
            }
        };
        tracing::info!(
            "issue {} requests {} -> {}",
            request.issue,
            request.entry.from,
            request.entry.to
        );

        let pages = &self.settings.pages_branch;
        let index = IndexStore::new(self.gateway, self.repository)
            .load(pages)
            .await
            .merge(&request.entry);
        let artifacts = SiteRenderer::new()?.render(&index, &request)?;
        let revision = Publisher::new(self.gateway, self.repository)
            .publish(pages, &artifacts, &request.commit_message())
            .await?;

        IssueNotifier::new(self.gateway, self.repository)
            .confirm(&request)
            .await
            .map_err(|source| ShortenError::Notify {
                issue: request.issue,
                source,
            })?;

        Ok(ShortenOutcome::Published { request, revision })
    }

    async fn reject(&self, issue: IssueNumber, error: &RequestParseError) {
        if let Err(comment_error) = IssueNotifier::new(self.gateway, self.repository)
            .report_rejection(issue, error)
            .await
        {
            tracing::warn!("failed to explain rejection on issue {issue}: {comment_error}");
        }
    }
}
