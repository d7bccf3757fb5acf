//! Publishing the action's build output under floating version tags.
//!
//! A pushed `v{major}.{minor}.{patch}` tag triggers a build commit on top of
//! the tagged commit that adds the bundled files, after which `v{major}` and
//! `v{major}.{minor}` are moved to it. Workflows pinned to a floating tag
//! pick up the release without the bundle living on the default branch.

use std::fmt;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use semver::Version;
use thiserror::Error;

use crate::github::{GitObjectGateway, ObjectId, RefName, RepositoryLocator};
use crate::publish::{Artifact, PublishError, PublishStage, Publisher};


/// Build outputs committed with every release, relative to the workspace.
pub const RELEASE_ARTIFACTS: [&str; 3] = [
    "dist/index.js",
    "dist/index.js.map",
    "dist/sourcemap-register.js",
];

const TAG_REF_PREFIX: &str = "refs/tags/v";

/// Failures of the release routine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReleaseError {
    /// The pushed ref is not a `v`-prefixed semantic version tag.
    #[error("'{reference}' is not a release tag of the form refs/tags/vMAJOR.MINOR.PATCH")]
    InvalidReleaseTag {
        /// The offending ref.
        reference: String,
    },
    /// A build output could not be read.
    #[error("failed to read release artifact '{path}': {message}")]
    Artifact {
        /// Artifact path.
        path: String,
        /// I/O error message.
        message: String,
    },
    /// A remote step failed.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Semantic version taken from a release tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    version: Version,
}

impl ReleaseVersion {
    /// Parses `refs/tags/v{semver}`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidReleaseTag`] for any other ref.
    pub fn from_ref(reference: &str) -> Result<Self, ReleaseError> {
        let invalid = || ReleaseError::InvalidReleaseTag {
            reference: reference.to_owned(),
        };
        let text = reference.strip_prefix(TAG_REF_PREFIX).ok_or_else(invalid)?;
        let version = Version::parse(text).map_err(|error| {
            tracing::debug!("{reference} is not semver: {error}");
            invalid()
        })?;
        Ok(Self { version })
    }

    /// Major version.
    #[must_use]
    pub const fn major(&self) -> u64 {
        self.version.major
    }

    /// Minor version.
    #[must_use]
    pub const fn minor(&self) -> u64 {
        self.version.minor
    }

    /// Message of the build commit, e.g. `v1.4.2 build`.
    #[must_use]
    pub fn commit_message(&self) -> String {
        format!("v{self} build")
    }

    /// Tags that follow the latest release of this line: `v{major}` and
    /// `v{major}.{minor}`.
    #[must_use]
    pub fn floating_tags(&self) -> [RefName; 2] {
        [
            RefName::tag(format!("v{}", self.version.major)),
            RefName::tag(format!("v{}.{}", self.version.major, self.version.minor)),
        ]
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.version, f)
    }
}

/// Reads [`RELEASE_ARTIFACTS`] from `workspace`.
///
/// # Errors
///
/// Returns [`ReleaseError::Artifact`] for the first file that cannot be
/// read.
pub fn load_artifacts(workspace: &Utf8Path) -> Result<Vec<Artifact>, ReleaseError> {
    let dir = Dir::open_ambient_dir(workspace, ambient_authority()).map_err(|error| {
        ReleaseError::Artifact {
            path: workspace.to_string(),
            message: error.to_string(),
        }
    })?;
    RELEASE_ARTIFACTS
        .iter()
        .map(|path| {
            dir.read(path)
                .map(|content| Artifact::new(*path, content))
                .map_err(|error| ReleaseError::Artifact {
                    path: (*path).to_owned(),
                    message: error.to_string(),
                })
        })
        .collect()
}

/// Result of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasedBuild {
    /// Version released.
    pub version: ReleaseVersion,
    /// The build commit.
    pub commit: ObjectId,
    /// Floating tags now pointing at the build commit.
    pub tags: Vec<RefName>,
}

/// Creates build commits and moves the floating tags.
pub struct ReleaseTagger<'a, Gateway>
where
    Gateway: GitObjectGateway,
{
    gateway: &'a Gateway,
    repository: &'a RepositoryLocator,
}

impl<'a, Gateway> ReleaseTagger<'a, Gateway>
where
    Gateway: GitObjectGateway,
{
    /// Creates a tagger for `repository`.
    #[must_use]
    pub const fn new(gateway: &'a Gateway, repository: &'a RepositoryLocator) -> Self {
        Self {
            gateway,
            repository,
        }
    }

    /// Releases the build in `workspace` for the tag `git_ref` pushed at
    /// `pushed`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::InvalidReleaseTag`] before any remote call
    /// when `git_ref` is not a release tag, [`ReleaseError::Artifact`] when
    /// a build output is missing, and [`ReleaseError::Publish`] when a
    /// remote step fails.
    pub async fn release(
        &self,
        git_ref: &str,
        pushed: &ObjectId,
        workspace: &Utf8Path,
    ) -> Result<ReleasedBuild, ReleaseError> {
        let version = ReleaseVersion::from_ref(git_ref)?;
        let artifacts = load_artifacts(workspace)?;
        self.publish_build(version, pushed, &artifacts).await
    }

    /// Commits `artifacts` on top of `pushed` and points the floating tags
    /// of `version` at the result.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::Publish`] for the first remote step that
    /// fails.
    pub async fn publish_build(
        &self,
        version: ReleaseVersion,
        pushed: &ObjectId,
        artifacts: &[Artifact],
    ) -> Result<ReleasedBuild, ReleaseError> {
        let publisher = Publisher::new(self.gateway, self.repository);
        let (commit, _) = publisher
            .write_revision(Some(pushed), artifacts, &version.commit_message())
            .await?;
        tracing::info!("created build commit {commit} for v{version}");

        let tags = version.floating_tags();
        for tag in &tags {
            let existing = self
                .gateway
                .get_ref(self.repository, tag)
                .await
                .map_err(|source| PublishError {
                    stage: PublishStage::ResolvePointer,
                    source,
                })?;
            publisher
                .create_or_update_ref(tag, &commit, existing.is_some())
                .await?;
        }

        Ok(ReleasedBuild {
            version,
            commit,
            tags: tags.into(),
        })
    }
}
