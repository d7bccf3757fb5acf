//! Top-level error of a run.

use thiserror::Error;

use crate::event::EventError;
use crate::github::GitHubError;
use crate::release::ReleaseError;
use crate::shortener::ShortenError;

/// Any failure that ends a run with a non-zero exit status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RunError {
    /// Configuration or GitHub client setup failed.
    #[error(transparent)]
    GitHub(#[from] GitHubError),
    /// The event payload could not be read.
    #[error(transparent)]
    Event(#[from] EventError),
    /// Shortening the labelled issue failed.
    #[error(transparent)]
    Shorten(#[from] ShortenError),
    /// The release routine failed.
    #[error(transparent)]
    Release(#[from] ReleaseError),
}
