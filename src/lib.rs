//! Shorty library crate: a URL shortener published on GitHub Pages.
//!
//! Applying the trigger label to an issue that names a target URL adds a
//! redirect page to the repository's Pages branch, records the link in
//! `index.json`, and closes the issue with a confirmation comment. A
//! separate release routine publishes the action's own build output under
//! floating `vMAJOR` and `vMAJOR.MINOR` tags.
//!
//! All remote state lives in git objects reached through
//! [`GitObjectGateway`]; Octocrab provides the production implementation.

pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod github;
pub mod publish;
pub mod release;
pub mod shortener;
pub mod telemetry;

pub use config::{OperationMode, ShortyConfig};
pub use error::RunError;
pub use event::{EventError, IssuesEvent};
pub use github::{
    GitHubError, GitObjectGateway, IssueGateway, OctocrabRepositoryGateway, PersonalAccessToken,
    RepositoryLocator,
};
pub use publish::{Artifact, PublishError, PublishedRevision, Publisher};
pub use release::{ReleaseError, ReleaseTagger, ReleaseVersion};
pub use shortener::{ShortenError, ShortenOutcome, ShortenSettings, ShortenWorkflow};
