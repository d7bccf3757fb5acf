//! Failures of the issue shortening protocol.

use thiserror::Error;

use super::request::RequestParseError;
use super::site::RenderError;
use crate::github::{GitHubError, IssueNumber};
use crate::publish::PublishError;

/// A labelled issue could not be turned into a published short link.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ShortenError {
    /// The Pages site of the repository could not be derived.
    #[error("cannot derive the Pages site: {0}")]
    InvalidSite(GitHubError),
    /// The issue does not describe a usable short link.
    #[error(transparent)]
    Parse(#[from] RequestParseError),
    /// The site could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The revision could not be published.
    #[error(transparent)]
    Publish(#[from] PublishError),
    /// The link was published but the issue could not be updated.
    #[error("published, but failed to notify issue {issue}: {source}")]
    Notify {
        /// Issue that was not updated.
        issue: IssueNumber,
        /// Gateway failure.
        source: GitHubError,
    },
}
