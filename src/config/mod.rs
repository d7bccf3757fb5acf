//! Action configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in defaults (`gh-pages`, `shorten`)
//! 2. **Configuration file** – `.shorty.toml` in the current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `SHORTY_TOKEN`, `SHORTY_REPOSITORY`, ...
//! 4. **Command-line arguments** – `--token`/`-t`, `--repository`/`-r`, ...
//!
//! Values still unset after merging fall back to the variables GitHub
//! Actions provides to every step (`GITHUB_TOKEN`, `GITHUB_REPOSITORY`,
//! `GITHUB_EVENT_PATH`, ...).
//!
//! # Configuration File
//!
//! ```toml
//! repository = "octocat/links"
//! pages_branch = "gh-pages"
//! label = "shorten"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::github::{GitHubError, ObjectId, PersonalAccessToken, RefName, RepositoryLocator};
use crate::shortener::{ShortenSettings, SlugCodec};

/// What a run should do, derived from the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Commit the build output and move the floating release tags.
    Release,
    /// Turn the labelled issue in the event payload into a short link.
    ShortenIssue,
    /// The triggering event is not one the action handles.
    Skip,
}

const DEFAULT_PAGES_BRANCH: &str = "gh-pages";
const DEFAULT_LABEL: &str = "shorten";
const ISSUES_EVENT: &str = "issues";

/// Configuration of a shorty run.
///
/// # Environment Variables
///
/// - `SHORTY_TOKEN`, `GITHUB_TOKEN`, `INPUT_TOKEN`, or `--token`
/// - `SHORTY_REPOSITORY`, `GITHUB_REPOSITORY`, or `--repository`
/// - `SHORTY_API_URL`, `GITHUB_API_URL`, or `--api-url`
/// - `SHORTY_EVENT_NAME`, `GITHUB_EVENT_NAME`, or `--event-name`
/// - `SHORTY_EVENT_PATH`, `GITHUB_EVENT_PATH`, or `--event-path`
/// - `SHORTY_GIT_REF`, `GITHUB_REF`, or `--git-ref`
/// - `SHORTY_SHA`, `GITHUB_SHA`, or `--sha`
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use shorty::ShortyConfig;
///
/// let config = ShortyConfig::load().expect("failed to load configuration");
/// let repository = config.resolve_repository().expect("repository required");
/// let token = config.resolve_token().expect("token required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "SHORTY",
    discovery(
        dotfile_name = ".shorty.toml",
        config_file_name = "shorty.toml",
        app_name = "shorty"
    )
)]
pub struct ShortyConfig {
    /// Token for GitHub API authentication.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Repository as `owner/repo`.
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise Server.
    #[ortho_config()]
    pub api_url: Option<String>,

    /// Name of the workflow event, e.g. `issues`.
    #[ortho_config(cli_short = 'e')]
    pub event_name: Option<String>,

    /// Path of the JSON event payload.
    #[ortho_config(cli_short = 'p')]
    pub event_path: Option<String>,

    /// Ref that triggered a release, e.g. `refs/tags/v1.4.2`.
    #[ortho_config()]
    pub git_ref: Option<String>,

    /// Commit the release ref points at.
    #[ortho_config()]
    pub sha: Option<String>,

    /// Branch the Pages site is published on.
    #[ortho_config(cli_short = 'b')]
    pub pages_branch: String,

    /// Label that triggers shortening.
    #[ortho_config(cli_short = 'l')]
    pub label: String,

    /// Salt for generated short paths. Changing it changes every generated
    /// path, so it should be set once.
    #[ortho_config()]
    pub slug_salt: String,

    /// Runs the release routine instead of handling an event.
    ///
    /// Can be provided via:
    /// - CLI: `--release`
    /// - Config file: `release = true`
    ///
    /// Note: `SHORTY_RELEASE` is not read because `ortho_config` does not
    /// load boolean values from the environment.
    #[ortho_config()]
    pub release: bool,
}

impl Default for ShortyConfig {
    fn default() -> Self {
        Self {
            token: None,
            repository: None,
            api_url: None,
            event_name: None,
            event_path: None,
            git_ref: None,
            sha: None,
            pages_branch: DEFAULT_PAGES_BRANCH.to_owned(),
            label: DEFAULT_LABEL.to_owned(),
            slug_salt: String::new(),
            release: false,
        }
    }
}

/// Returns the configured value, else the first non-empty fallback
/// variable.
fn configured_or_env(configured: Option<&String>, fallbacks: &[&str]) -> Option<String> {
    configured
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .or_else(|| {
            fallbacks
                .iter()
                .filter_map(|name| env::var(name).ok())
                .map(|value| value.trim().to_owned())
                .find(|value| !value.is_empty())
        })
}

fn missing(what: &str, variable: &str) -> GitHubError {
    GitHubError::Configuration {
        message: format!("{what} is not configured (set {variable} or the shorty equivalent)"),
    }
}

impl ShortyConfig {
    /// Resolves the token from configuration, `GITHUB_TOKEN`, or the action
    /// input `INPUT_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingToken`] when no source provides a
    /// value.
    pub fn resolve_token(&self) -> Result<PersonalAccessToken, GitHubError> {
        let token = configured_or_env(self.token.as_ref(), &["GITHUB_TOKEN", "INPUT_TOKEN"])
            .ok_or(GitHubError::MissingToken)?;
        PersonalAccessToken::new(token)
    }

    /// Resolves the repository and API base.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Configuration`] when no repository is set and
    /// the slug or API URL errors from [`RepositoryLocator::from_slug`].
    pub fn resolve_repository(&self) -> Result<RepositoryLocator, GitHubError> {
        let slug = configured_or_env(self.repository.as_ref(), &["GITHUB_REPOSITORY"])
            .ok_or_else(|| missing("repository", "GITHUB_REPOSITORY"))?;
        let api_url = configured_or_env(self.api_url.as_ref(), &["GITHUB_API_URL"]);
        RepositoryLocator::from_slug(&slug, api_url.as_deref())
    }

    /// Resolves the workflow event name, if any.
    #[must_use]
    pub fn resolve_event_name(&self) -> Option<String> {
        configured_or_env(self.event_name.as_ref(), &["GITHUB_EVENT_NAME"])
    }

    /// Resolves the event payload path.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Configuration`] when no path is set.
    pub fn resolve_event_path(&self) -> Result<Utf8PathBuf, GitHubError> {
        configured_or_env(self.event_path.as_ref(), &["GITHUB_EVENT_PATH"])
            .map(Utf8PathBuf::from)
            .ok_or_else(|| missing("event payload path", "GITHUB_EVENT_PATH"))
    }

    /// Resolves the ref that triggered a release.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Configuration`] when no ref is set.
    pub fn resolve_git_ref(&self) -> Result<String, GitHubError> {
        configured_or_env(self.git_ref.as_ref(), &["GITHUB_REF"])
            .ok_or_else(|| missing("git ref", "GITHUB_REF"))
    }

    /// Resolves the commit that triggered a release.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Configuration`] when no SHA is set.
    pub fn resolve_sha(&self) -> Result<ObjectId, GitHubError> {
        configured_or_env(self.sha.as_ref(), &["GITHUB_SHA"])
            .map(ObjectId::new)
            .ok_or_else(|| missing("commit SHA", "GITHUB_SHA"))
    }

    /// Settings for the shortening protocol.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Configuration`] when the slug salt is
    /// rejected.
    pub fn shorten_settings(&self) -> Result<ShortenSettings, GitHubError> {
        let slugs =
            SlugCodec::new(&self.slug_salt).map_err(|error| GitHubError::Configuration {
                message: error.to_string(),
            })?;
        Ok(ShortenSettings {
            label: self.label.clone(),
            pages_branch: RefName::branch(self.pages_branch.clone()),
            slugs,
        })
    }

    /// Determines what this run should do.
    ///
    /// Returns `Release` when the release routine was requested,
    /// `ShortenIssue` for `issues` events, and `Skip` otherwise.
    #[must_use]
    pub fn operation_mode(&self) -> OperationMode {
        if self.release {
            OperationMode::Release
        } else if self.resolve_event_name().as_deref() == Some(ISSUES_EVENT) {
            OperationMode::ShortenIssue
        } else {
            OperationMode::Skip
        }
    }
}

#[cfg(test)]
mod tests;
