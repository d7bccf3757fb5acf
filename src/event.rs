//! Webhook payload of the `issues` event that triggers a run.

use std::fmt;

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::Deserialize;
use thiserror::Error;

/// The event payload could not be obtained.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EventError {
    /// The payload file could not be read.
    #[error("failed to read event payload '{path}': {message}")]
    Read {
        /// Payload path.
        path: String,
        /// I/O error message.
        message: String,
    },
    /// The payload is not a valid `issues` event.
    #[error("failed to decode issues event: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
}

/// Action recorded on an `issues` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum IssueAction {
    /// A label was applied.
    Labeled,
    /// Any other action, kept verbatim.
    Other(String),
}

impl From<String> for IssueAction {
    fn from(action: String) -> Self {
        if action == "labeled" {
            Self::Labeled
        } else {
            Self::Other(action)
        }
    }
}

impl fmt::Display for IssueAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Labeled => f.write_str("labeled"),
            Self::Other(action) => f.write_str(action),
        }
    }
}

/// Label attached by a `labeled` action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    /// Label name.
    pub name: String,
}

/// The issue an event refers to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    /// Issue number.
    pub number: u64,
    /// Issue title.
    #[serde(default)]
    pub title: String,
    /// Issue body; absent when the issue was opened without one.
    #[serde(default)]
    pub body: Option<String>,
    /// `open` or `closed`.
    pub state: String,
}

/// An `issues` webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuesEvent {
    /// What happened to the issue.
    pub action: IssueAction,
    /// The label applied, for `labeled` actions.
    #[serde(default)]
    pub label: Option<Label>,
    /// The issue.
    pub issue: Issue,
}

/// Why an event does not start the shortening protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The action was not `labeled`.
    NotLabeled(IssueAction),
    /// A label other than the trigger label was applied.
    OtherLabel(Option<String>),
    /// The issue is not open.
    NotOpen(String),
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotLabeled(action) => write!(f, "action '{action}' is not 'labeled'"),
            Self::OtherLabel(Some(name)) => write!(f, "label '{name}' is not the trigger label"),
            Self::OtherLabel(None) => f.write_str("event carries no label"),
            Self::NotOpen(state) => write!(f, "issue is {state}"),
        }
    }
}

impl IssuesEvent {
    /// Decodes an event payload.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Decode`] when `payload` is not an `issues`
    /// event.
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        serde_json::from_str(payload).map_err(|error| EventError::Decode {
            message: error.to_string(),
        })
    }

    /// Reads and decodes the payload file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Read`] when the file cannot be read and
    /// [`EventError::Decode`] when it is not an `issues` event.
    pub fn read(path: &Utf8Path) -> Result<Self, EventError> {
        let read_error = |message: String| EventError::Read {
            path: path.to_string(),
            message,
        };
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let file_name = path
            .file_name()
            .ok_or_else(|| read_error("no file name".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|error| read_error(error.to_string()))?;
        let payload = dir
            .read_to_string(file_name)
            .map_err(|error| read_error(error.to_string()))?;
        Self::from_json(&payload)
    }

    /// Returns the issue when this event is `label` being applied to an open
    /// issue.
    ///
    /// # Errors
    ///
    /// Returns the [`IgnoreReason`] when the event should be skipped.
    pub fn trigger(&self, label: &str) -> Result<&Issue, IgnoreReason> {
        if self.action != IssueAction::Labeled {
            return Err(IgnoreReason::NotLabeled(self.action.clone()));
        }
        let applied = self.label.as_ref().map(|applied| applied.name.as_str());
        if applied != Some(label) {
            return Err(IgnoreReason::OtherLabel(applied.map(ToOwned::to_owned)));
        }
        if self.issue.state != "open" {
            return Err(IgnoreReason::NotOpen(self.issue.state.clone()));
        }
        Ok(&self.issue)
    }
}
