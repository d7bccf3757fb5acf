//! Extraction of short-link requests from free-form issue text.
//!
//! Two layouts are accepted:
//!
//! - the target URL as the issue title, with an optional short path on the
//!   first body line;
//! - the target URL on the first body line, with an optional short path on
//!   the second.
//!
//! When no short path is given the issue number is encoded with
//! [`SlugCodec`]. Lines after the ones consumed become the commit
//! description.

use thiserror::Error;
use url::Url;

use super::entry::{ShortLinkEntry, SiteBase};
use super::slug::SlugCodec;
use crate::event::Issue;
use crate::github::IssueNumber;

/// Reasons an issue cannot be turned into a short link.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestParseError {
    /// Neither the title nor the first body line is an absolute URL.
    #[error(
        "no absolute target URL found in the issue title or the first line of the body \
         ({reason})"
    )]
    MissingTarget {
        /// Parser message for the first body line.
        reason: String,
    },

    /// The requested short path does not name a page inside the site.
    #[error("short path {segment:?} does not resolve to a page under {site}")]
    OutsideSite {
        /// Short path as written in the issue.
        segment: String,
        /// Site root the path was resolved against.
        site: String,
    },
}

/// A parsed, validated short-link request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLinkRequest {
    /// Originating issue.
    pub issue: IssueNumber,
    /// The mapping to publish.
    pub entry: ShortLinkEntry,
    /// Location of the redirect page relative to the site root.
    pub short_path: String,
    /// Remaining body lines, carried into the commit message.
    pub description: Vec<String>,
}

impl ShortLinkRequest {
    /// Commit message recording the mapping and closing the issue.
    #[must_use]
    pub fn commit_message(&self) -> String {
        let summary = format!(
            "{} to {} (closes #{})",
            self.entry.from,
            self.entry.to,
            self.issue.get()
        );
        if self.description.is_empty() {
            summary
        } else {
            format!("{summary}\n\n{}", self.description.join("\n"))
        }
    }
}

/// Parses issues into [`ShortLinkRequest`]s for one site.
#[derive(Debug, Clone)]
pub struct RequestParser<'a> {
    site: &'a SiteBase,
    slugs: &'a SlugCodec,
}

fn description_lines<'b>(lines: impl Iterator<Item = &'b str>) -> Vec<String> {
    let mut description: Vec<String> = lines
        .map(|line| line.trim_end().to_owned())
        .collect();
    while description.last().is_some_and(String::is_empty) {
        description.pop();
    }
    description
}

impl<'a> RequestParser<'a> {
    /// Creates a parser building short URLs under `site`.
    #[must_use]
    pub const fn new(site: &'a SiteBase, slugs: &'a SlugCodec) -> Self {
        Self { site, slugs }
    }

    /// Extracts the short-link request carried by `issue`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestParseError::MissingTarget`] when no absolute target
    /// URL is present, and [`RequestParseError::OutsideSite`] when the short
    /// path would escape the site or has an empty segment.
    pub fn parse(&self, issue: &Issue) -> Result<ShortLinkRequest, RequestParseError> {
        let number = IssueNumber::new(issue.number);
        let mut lines = issue.body.as_deref().unwrap_or_default().split('\n');
        let first_line = lines.next().map(str::trim).unwrap_or_default();
        let second_line = lines.next().map(str::trim).unwrap_or_default();
        let description = description_lines(lines);

        let (to, requested_path) = match Url::parse(issue.title.trim()) {
            Ok(target) => (target, first_line),
            Err(_) => {
                let target =
                    Url::parse(first_line).map_err(|error| RequestParseError::MissingTarget {
                        reason: format!("{first_line:?}: {error}"),
                    })?;
                (target, second_line)
            }
        };

        let segment = if requested_path.is_empty() {
            self.slugs.encode(number.get())
        } else {
            requested_path.to_owned()
        };

        let outside_site = || RequestParseError::OutsideSite {
            segment: segment.clone(),
            site: self.site.root(),
        };
        let from = self.site.short_url(&segment).ok_or_else(outside_site)?;
        let short_path = self.site.short_path(&from).ok_or_else(outside_site)?;

        Ok(ShortLinkRequest {
            issue: number,
            entry: ShortLinkEntry { from, to },
            short_path,
            description,
        })
    }
}
