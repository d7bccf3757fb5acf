//! In-memory, content-addressed stand-in for a GitHub repository.
//!
//! Trees are flat `path -> blob` maps keyed by a SHA-256 of their contents,
//! which is enough to observe overlay and parentage behaviour without HTTP.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use super::{GitObjectGateway, IssueGateway};
use crate::github::error::GitHubError;
use crate::github::locator::{IssueNumber, RepositoryLocator};
use crate::github::models::{FileMode, NewCommit, ObjectId, RefName, TreeEntry};

type Tree = BTreeMap<String, (FileMode, ObjectId)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct StoredCommit {
    pub(crate) message: String,
    pub(crate) tree: ObjectId,
    pub(crate) parents: Vec<ObjectId>,
}

/// Remote operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    CreateBlob,
    CreateTree,
    CreateCommit,
    CreateRef,
    UpdateRef,
    CreateComment,
    CloseIssue,
}

#[derive(Debug, Default)]
struct State {
    blobs: HashMap<ObjectId, Vec<u8>>,
    trees: HashMap<ObjectId, Tree>,
    commits: HashMap<ObjectId, StoredCommit>,
    refs: HashMap<String, ObjectId>,
    tree_bases: Vec<ObjectId>,
    forced_updates: Vec<String>,
    comments: Vec<(IssueNumber, String)>,
    closed: Vec<IssueNumber>,
    failing: Option<Operation>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryGitStore {
    state: Mutex<State>,
}

fn digest(kind: &str, payload: &[u8]) -> ObjectId {
    let mut hasher = Sha256::new();
    hasher.update(format!("{kind} {}\0", payload.len()).as_bytes());
    hasher.update(payload);
    ObjectId::new(hex::encode(hasher.finalize()))
}

fn tree_id(tree: &Tree) -> ObjectId {
    let listing: String = tree
        .iter()
        .map(|(path, (mode, blob))| format!("{} {path} {blob}\n", mode.as_str()))
        .collect();
    digest("tree", listing.as_bytes())
}

impl MemoryGitStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("memory store mutex should be available")
    }

    fn check(&self, operation: Operation) -> Result<(), GitHubError> {
        if self.lock().failing == Some(operation) {
            return Err(GitHubError::Api {
                message: format!("injected failure for {operation:?}"),
            });
        }
        Ok(())
    }

    pub(crate) fn fail_on(&self, operation: Operation) {
        self.lock().failing = Some(operation);
    }

    /// Seeds a branch with a single commit holding `files`.
    pub(crate) fn seed_branch(&self, reference: &RefName, files: &[(&str, &str)]) -> ObjectId {
        let mut state = self.lock();
        let mut tree = Tree::new();
        for (path, content) in files {
            let blob = digest("blob", content.as_bytes());
            state.blobs.insert(blob.clone(), content.as_bytes().to_vec());
            tree.insert((*path).to_owned(), (FileMode::Regular, blob));
        }
        let tree_sha = tree_id(&tree);
        state.trees.insert(tree_sha.clone(), tree);
        let commit = StoredCommit {
            message: "seed".to_owned(),
            tree: tree_sha,
            parents: Vec::new(),
        };
        let commit_sha = digest("commit", format!("{commit:?}").as_bytes());
        state.commits.insert(commit_sha.clone(), commit);
        state.refs.insert(reference.qualified(), commit_sha.clone());
        commit_sha
    }

    pub(crate) fn ref_target(&self, reference: &RefName) -> Option<ObjectId> {
        self.lock().refs.get(&reference.qualified()).cloned()
    }

    pub(crate) fn commit(&self, sha: &ObjectId) -> Option<StoredCommit> {
        self.lock().commits.get(sha).cloned()
    }

    /// Paths and contents of the tree behind `commit`.
    pub(crate) fn files_at(&self, commit: &ObjectId) -> BTreeMap<String, String> {
        let state = self.lock();
        let Some(tree) = state
            .commits
            .get(commit)
            .and_then(|stored| state.trees.get(&stored.tree))
        else {
            return BTreeMap::new();
        };
        tree.iter()
            .map(|(path, (_, blob))| {
                let content = state.blobs.get(blob).cloned().unwrap_or_default();
                (
                    path.clone(),
                    String::from_utf8(content).expect("test blobs should be UTF-8"),
                )
            })
            .collect()
    }

    pub(crate) fn tree_bases(&self) -> Vec<ObjectId> {
        self.lock().tree_bases.clone()
    }

    pub(crate) fn forced_updates(&self) -> Vec<String> {
        self.lock().forced_updates.clone()
    }

    pub(crate) fn comments(&self) -> Vec<(IssueNumber, String)> {
        self.lock().comments.clone()
    }

    pub(crate) fn closed(&self) -> Vec<IssueNumber> {
        self.lock().closed.clone()
    }

    pub(crate) fn commit_count(&self) -> usize {
        self.lock().commits.len()
    }
}

#[async_trait]
impl GitObjectGateway for MemoryGitStore {
    async fn get_ref(
        &self,
        _repository: &RepositoryLocator,
        reference: &RefName,
    ) -> Result<Option<ObjectId>, GitHubError> {
        Ok(self.ref_target(reference))
    }

    async fn get_content(
        &self,
        _repository: &RepositoryLocator,
        reference: &RefName,
        path: &str,
    ) -> Result<Option<Vec<u8>>, GitHubError> {
        let state = self.lock();
        let content = state
            .refs
            .get(&reference.qualified())
            .and_then(|commit| state.commits.get(commit))
            .and_then(|commit| state.trees.get(&commit.tree))
            .and_then(|tree| tree.get(path))
            .and_then(|(_, blob)| state.blobs.get(blob))
            .cloned();
        Ok(content)
    }

    async fn commit_tree(
        &self,
        _repository: &RepositoryLocator,
        commit: &ObjectId,
    ) -> Result<ObjectId, GitHubError> {
        self.lock()
            .commits
            .get(commit)
            .map(|stored| stored.tree.clone())
            .ok_or_else(|| GitHubError::Api {
                message: format!("no commit {commit}"),
            })
    }

    async fn create_blob(
        &self,
        _repository: &RepositoryLocator,
        content: &[u8],
    ) -> Result<ObjectId, GitHubError> {
        self.check(Operation::CreateBlob)?;
        let blob = digest("blob", content);
        self.lock().blobs.insert(blob.clone(), content.to_vec());
        Ok(blob)
    }

    async fn create_tree(
        &self,
        _repository: &RepositoryLocator,
        base_tree: &ObjectId,
        entries: &[TreeEntry],
    ) -> Result<ObjectId, GitHubError> {
        self.check(Operation::CreateTree)?;
        let mut state = self.lock();
        state.tree_bases.push(base_tree.clone());
        let mut tree = if base_tree == &ObjectId::empty_tree() {
            Tree::new()
        } else {
            state
                .trees
                .get(base_tree)
                .cloned()
                .ok_or_else(|| GitHubError::Api {
                    message: format!("no tree {base_tree}"),
                })?
        };
        for entry in entries {
            tree.insert(entry.path.clone(), (entry.mode, entry.blob.clone()));
        }
        let sha = tree_id(&tree);
        state.trees.insert(sha.clone(), tree);
        Ok(sha)
    }

    async fn create_commit(
        &self,
        _repository: &RepositoryLocator,
        commit: &NewCommit,
    ) -> Result<ObjectId, GitHubError> {
        self.check(Operation::CreateCommit)?;
        let stored = StoredCommit {
            message: commit.message.clone(),
            tree: commit.tree.clone(),
            parents: commit.parents.clone(),
        };
        let sha = digest("commit", format!("{stored:?}").as_bytes());
        self.lock().commits.insert(sha.clone(), stored);
        Ok(sha)
    }

    async fn create_ref(
        &self,
        _repository: &RepositoryLocator,
        reference: &RefName,
        target: &ObjectId,
    ) -> Result<(), GitHubError> {
        self.check(Operation::CreateRef)?;
        let mut state = self.lock();
        let name = reference.qualified();
        if state.refs.contains_key(&name) {
            return Err(GitHubError::Api {
                message: format!("reference {name} already exists"),
            });
        }
        state.refs.insert(name, target.clone());
        Ok(())
    }

    async fn update_ref(
        &self,
        _repository: &RepositoryLocator,
        reference: &RefName,
        target: &ObjectId,
        force: bool,
    ) -> Result<(), GitHubError> {
        self.check(Operation::UpdateRef)?;
        let mut state = self.lock();
        let name = reference.qualified();
        if !state.refs.contains_key(&name) {
            return Err(GitHubError::Api {
                message: format!("reference {name} does not exist"),
            });
        }
        if force {
            state.forced_updates.push(name.clone());
        }
        state.refs.insert(name, target.clone());
        Ok(())
    }
}

#[async_trait]
impl IssueGateway for MemoryGitStore {
    async fn create_comment(
        &self,
        _repository: &RepositoryLocator,
        issue: IssueNumber,
        body: &str,
    ) -> Result<(), GitHubError> {
        self.check(Operation::CreateComment)?;
        self.lock().comments.push((issue, body.to_owned()));
        Ok(())
    }

    async fn close_issue(
        &self,
        _repository: &RepositoryLocator,
        issue: IssueNumber,
    ) -> Result<(), GitHubError> {
        self.check(Operation::CloseIssue)?;
        self.lock().closed.push(issue);
        Ok(())
    }
}
