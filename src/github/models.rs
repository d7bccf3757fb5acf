//! Git object model types and the wire shapes used to exchange them with
//! the GitHub git data API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known identifier of git's empty tree.
///
/// GitHub accepts it as a `base_tree` even in repositories that have never
/// stored it, which makes it the diff base for parentless commits.
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Content-addressed object identifier (blob, tree, or commit SHA).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Wraps a raw SHA string.
    #[must_use]
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// The empty-tree sentinel.
    #[must_use]
    pub fn empty_tree() -> Self {
        Self::new(EMPTY_TREE_SHA)
    }

    /// Borrow the SHA.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Namespace a named reference lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefKind {
    /// `refs/heads/*`
    Branch,
    /// `refs/tags/*`
    Tag,
}

/// A mutable named reference such as `refs/heads/gh-pages`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefName {
    kind: RefKind,
    name: String,
}

impl RefName {
    /// A branch reference.
    #[must_use]
    pub fn branch(name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Branch,
            name: name.into(),
        }
    }

    /// A tag reference.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            kind: RefKind::Tag,
            name: name.into(),
        }
    }

    /// The reference namespace.
    #[must_use]
    pub const fn kind(&self) -> RefKind {
        self.kind
    }

    /// Unqualified name, e.g. `gh-pages`.
    #[must_use]
    pub const fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Name relative to `refs/`, e.g. `heads/gh-pages`.
    #[must_use]
    pub fn short(&self) -> String {
        match self.kind {
            RefKind::Branch => format!("heads/{}", self.name),
            RefKind::Tag => format!("tags/{}", self.name),
        }
    }

    /// Fully qualified name, e.g. `refs/heads/gh-pages`.
    #[must_use]
    pub fn qualified(&self) -> String {
        format!("refs/{}", self.short())
    }
}

impl fmt::Display for RefName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// Git file mode for tree entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileMode {
    /// Regular, non-executable file (`100644`).
    #[default]
    Regular,
    /// Executable file (`100755`).
    Executable,
}

impl FileMode {
    /// Octal mode string as the git data API expects it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "100644",
            Self::Executable => "100755",
        }
    }
}

/// A blob placed at a path in a tree being built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    /// Slash-separated path relative to the tree root.
    pub path: String,
    /// File mode.
    pub mode: FileMode,
    /// Blob identifier.
    pub blob: ObjectId,
}

/// Commit to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommit {
    /// Commit message.
    pub message: String,
    /// Root tree of the commit.
    pub tree: ObjectId,
    /// Parent commits; empty for a root commit.
    pub parents: Vec<ObjectId>,
}

// --- wire shapes ---

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiObject {
    pub(crate) sha: ObjectId,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiRef {
    pub(crate) object: ApiObject,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiCommit {
    pub(crate) sha: ObjectId,
    pub(crate) tree: ApiObject,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiContent {
    pub(crate) content: Option<String>,
    pub(crate) encoding: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiComment {
    pub(crate) id: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiIssue {
    pub(crate) number: u64,
    pub(crate) state: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ContentQuery<'a> {
    #[serde(rename = "ref")]
    pub(crate) reference: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBlobRequest {
    pub(crate) content: String,
    pub(crate) encoding: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiTreeEntry<'a> {
    pub(crate) path: &'a str,
    pub(crate) mode: &'static str,
    #[serde(rename = "type")]
    pub(crate) kind: &'static str,
    pub(crate) sha: &'a str,
}

impl<'a> From<&'a TreeEntry> for ApiTreeEntry<'a> {
    fn from(entry: &'a TreeEntry) -> Self {
        Self {
            path: entry.path.as_str(),
            mode: entry.mode.as_str(),
            kind: "blob",
            sha: entry.blob.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTreeRequest<'a> {
    pub(crate) base_tree: &'a str,
    pub(crate) tree: Vec<ApiTreeEntry<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCommitRequest<'a> {
    pub(crate) message: &'a str,
    pub(crate) tree: &'a str,
    pub(crate) parents: Vec<&'a str>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateRefRequest<'a> {
    #[serde(rename = "ref")]
    pub(crate) reference: String,
    pub(crate) sha: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRefRequest<'a> {
    pub(crate) sha: &'a str,
    pub(crate) force: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCommentRequest<'a> {
    pub(crate) body: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateIssueRequest {
    pub(crate) state: &'static str,
}
