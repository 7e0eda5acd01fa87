//! Git operations abstraction layer
//!
//! The release workflow reads commit history and tags, and finally creates the
//! version tag, through the [Repository] trait:
//!
//! - [repository::Git2Repository]: a real implementation using the `git2` crate
//! - [mock::MockRepository]: an in-memory implementation for tests
//!
//! ```rust
//! # use release_manager::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let head = repo.resolve_reference("HEAD")?;
//! let commits = repo.get_commits_between(None, head)?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;
use git2::Oid;

/// Commit information for analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CommitInfo {
    /// The full commit hash
    pub hash: String,
    /// The commit message
    pub message: String,
    /// The commit author
    pub author: String,
}

/// Common git operation trait for abstraction
///
/// All methods return [crate::error::Result<T>]; implementations map their
/// underlying errors (like `git2::Error`) to [crate::error::ReleaseError] variants.
pub trait Repository {
    /// Resolve a branch, tag, or any revision expression to a commit OID
    ///
    /// # Arguments
    /// * `reference` - e.g. "HEAD", "main", "v1.2.0", "origin/main~2"
    fn resolve_reference(&self, reference: &str) -> Result<Oid>;

    /// Get commits between two OIDs
    ///
    /// Returns commits reachable from `to_oid` (inclusive) but not from
    /// `from_oid` (exclusive), oldest first. With `from_oid = None` the whole
    /// history of `to_oid` is returned.
    fn get_commits_between(&self, from_oid: Option<Oid>, to_oid: Oid) -> Result<Vec<CommitInfo>>;

    /// Find a tag by name and get the OID of the commit it points to
    ///
    /// # Returns
    /// * `Ok(Some(Oid))` - Object ID of the tagged commit
    /// * `Ok(None)` - If the tag doesn't exist
    fn find_tag_oid(&self, tag_name: &str) -> Result<Option<Oid>>;

    /// Get all tag names in the repository
    fn list_tags(&self) -> Result<Vec<String>>;

    /// Create a lightweight tag at given OID
    ///
    /// Fails if the tag already exists.
    fn create_tag(&self, name: &str, oid: Oid) -> Result<()>;
}
