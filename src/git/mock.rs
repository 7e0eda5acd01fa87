use crate::error::{ReleaseError, Result};
use crate::git::{CommitInfo, Repository};
use git2::Oid;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Mock repository for testing without actual git operations
///
/// History is linear: commits are kept in insertion order, oldest first.
pub struct MockRepository {
    commits: Vec<(Oid, CommitInfo)>,
    tags: RefCell<BTreeMap<String, Oid>>,
    references: HashMap<String, Oid>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: RefCell::new(BTreeMap::new()),
            references: HashMap::new(),
        }
    }

    /// Append a commit with the given message and move `HEAD` to it
    pub fn commit(&mut self, message: &str) -> Oid {
        let index = self.commits.len() + 1;
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&(index as u64).to_be_bytes());
        let oid = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        self.add_commit(
            oid,
            CommitInfo {
                hash: oid.to_string(),
                message: message.to_string(),
                author: "Mock Author".to_string(),
            },
        );
        self.set_reference("HEAD", oid);
        oid
    }

    /// Add a commit to the end of the mock history
    pub fn add_commit(&mut self, oid: Oid, info: CommitInfo) {
        self.commits.push((oid, info));
    }

    /// Add a tag pointing to an OID
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.get_mut().insert(name.into(), oid);
    }

    /// Set a branch or symbolic reference
    pub fn set_reference(&mut self, name: impl Into<String>, oid: Oid) {
        self.references.insert(name.into(), oid);
    }

    fn position(&self, oid: Oid) -> Result<usize> {
        self.commits
            .iter()
            .position(|(candidate, _)| *candidate == oid)
            .ok_or_else(|| ReleaseError::tag(format!("Unknown commit: {}", oid)))
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn resolve_reference(&self, reference: &str) -> Result<Oid> {
        if let Some(oid) = self.references.get(reference) {
            return Ok(*oid);
        }
        if let Some(oid) = self.tags.borrow().get(reference) {
            return Ok(*oid);
        }
        Err(ReleaseError::tag(format!(
            "Cannot resolve reference '{}'",
            reference
        )))
    }

    fn get_commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>> {
        let end = self.position(to_oid)?;
        let start = match from_oid {
            Some(from) => self.position(from)? + 1,
            None => 0,
        };

        if start > end {
            return Ok(Vec::new());
        }

        Ok(self.commits[start..=end]
            .iter()
            .map(|(_, info)| info.clone())
            .collect())
    }

    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>> {
        Ok(self.tags.borrow().get(tag_name).copied())
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.borrow().keys().cloned().collect())
    }

    fn create_tag(&self, name: &str, oid: Oid) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(ReleaseError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), oid);
        Ok(())
    }
}
