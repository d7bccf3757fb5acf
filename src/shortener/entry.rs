//! Short-link entries and the GitHub Pages site they live under.

use url::Url;

use crate::github::{GitHubError, RepositoryLocator};

/// One short link: `from` on the Pages site redirects to `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkEntry {
    /// Short URL under the site base.
    pub from: Url,
    /// Absolute target URL.
    pub to: Url,
}

/// Base of the project Pages site, `https://{owner}.github.io/{repo}/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteBase {
    origin: Url,
    prefix: String,
}

impl SiteBase {
    /// Derives the Pages site of `repository`.
    ///
    /// # Errors
    ///
    /// Returns `GitHubError::InvalidUrl` when the owner does not form a valid
    /// host name.
    pub fn for_repository(repository: &RepositoryLocator) -> Result<Self, GitHubError> {
        let origin = Url::parse(&format!(
            "https://{}.github.io",
            repository.owner().as_str()
        ))
        .map_err(|error| GitHubError::InvalidUrl(error.to_string()))?;
        Ok(Self {
            origin,
            prefix: format!("/{}/", repository.repository().as_str()),
        })
    }

    /// Site root, e.g. `https://octo.github.io/links/`.
    #[must_use]
    pub fn root(&self) -> String {
        format!(
            "{}{}",
            self.origin.as_str().trim_end_matches('/'),
            self.prefix
        )
    }

    /// Resolves a short path segment to its URL under the site.
    ///
    /// Returns `None` when the segment cannot be joined onto the site.
    #[must_use]
    pub fn short_url(&self, segment: &str) -> Option<Url> {
        self.origin
            .join(&format!("{}{segment}", self.prefix))
            .ok()
    }

    /// Path of `from` relative to the site root, without surrounding
    /// slashes.
    ///
    /// Returns `None` when `from` is not a page below the site root, or
    /// when its path has an empty segment and so cannot name a tree entry.
    #[must_use]
    pub fn short_path(&self, from: &Url) -> Option<String> {
        if from.origin() != self.origin.origin() {
            return None;
        }
        let relative = from
            .path()
            .strip_prefix(self.prefix.as_str())?
            .trim_end_matches('/');
        if relative.split('/').any(str::is_empty) {
            return None;
        }
        Some(relative.to_owned())
    }
}
