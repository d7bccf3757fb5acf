//! Identity wrappers for the repository the action runs against.

use url::Url;

use super::error::GitHubError;

const PUBLIC_API_BASE: &str = "https://api.github.com";

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::InvalidRepository(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, GitHubError> {
        if value.is_empty() {
            return Err(GitHubError::InvalidRepository(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Issue number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IssueNumber(u64);

impl IssueNumber {
    /// Wraps a raw issue number.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for IssueNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, GitHubError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(GitHubError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(<redacted>)")
    }
}

/// Repository identity plus the API base every remote call is made against.
///
/// # Example
///
/// ```
/// use shorty::github::RepositoryLocator;
///
/// let locator = RepositoryLocator::from_slug("octo/links", None)
///     .expect("should parse repository slug");
/// assert_eq!(locator.owner().as_str(), "octo");
/// assert_eq!(locator.repository().as_str(), "links");
/// assert_eq!(locator.api_base().as_str(), "https://api.github.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryLocator {
    api_base: Url,
    owner: RepositoryOwner,
    repository: RepositoryName,
}

impl RepositoryLocator {
    /// Creates a locator from owner and repository name strings.
    ///
    /// `api_base` defaults to the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidRepository` when owner or repo is empty,
    /// or `GitHubError::InvalidUrl` when `api_base` cannot be parsed.
    pub fn from_owner_repo(
        owner: &str,
        repo: &str,
        api_base: Option<&str>,
    ) -> Result<Self, GitHubError> {
        let validated_owner = RepositoryOwner::new(owner)?;
        let repository = RepositoryName::new(repo)?;
        let parsed_base = Url::parse(api_base.unwrap_or(PUBLIC_API_BASE))
            .map_err(|error| GitHubError::InvalidUrl(error.to_string()))?;

        Ok(Self {
            api_base: parsed_base,
            owner: validated_owner,
            repository,
        })
    }

    /// Parses an `owner/repo` slug, the form GitHub Actions exposes in
    /// `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidRepository` when the slug does not have
    /// exactly two non-empty segments.
    pub fn from_slug(slug: &str, api_base: Option<&str>) -> Result<Self, GitHubError> {
        let trimmed = slug.trim();
        let (owner, repo) = trimmed
            .split_once('/')
            .ok_or_else(|| GitHubError::InvalidRepository(trimmed.to_owned()))?;
        if repo.contains('/') {
            return Err(GitHubError::InvalidRepository(trimmed.to_owned()));
        }
        Self::from_owner_repo(owner, repo, api_base)
            .map_err(|_| GitHubError::InvalidRepository(trimmed.to_owned()))
    }

    /// API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryName {
        &self.repository
    }

    fn repo_path(&self) -> String {
        format!(
            "/repos/{}/{}",
            self.owner.as_str(),
            self.repository.as_str()
        )
    }

    pub(crate) fn ref_path(&self, short_ref: &str) -> String {
        format!("{}/git/ref/{short_ref}", self.repo_path())
    }

    pub(crate) fn refs_path(&self) -> String {
        format!("{}/git/refs", self.repo_path())
    }

    pub(crate) fn update_ref_path(&self, short_ref: &str) -> String {
        format!("{}/git/refs/{short_ref}", self.repo_path())
    }

    pub(crate) fn blobs_path(&self) -> String {
        format!("{}/git/blobs", self.repo_path())
    }

    pub(crate) fn trees_path(&self) -> String {
        format!("{}/git/trees", self.repo_path())
    }

    pub(crate) fn commits_path(&self) -> String {
        format!("{}/git/commits", self.repo_path())
    }

    pub(crate) fn commit_path(&self, sha: &str) -> String {
        format!("{}/git/commits/{sha}", self.repo_path())
    }

    pub(crate) fn contents_path(&self, path: &str) -> String {
        format!("{}/contents/{path}", self.repo_path())
    }

    pub(crate) fn issue_path(&self, issue: IssueNumber) -> String {
        format!("{}/issues/{}", self.repo_path(), issue.get())
    }

    pub(crate) fn issue_comments_path(&self, issue: IssueNumber) -> String {
        format!("{}/comments", self.issue_path(issue))
    }
}
