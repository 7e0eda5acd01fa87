//! Domain logic - pure business rules independent of git and file operations

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::CommitRecord;
pub use tag::{LatestTag, TagPattern};
pub use version::{ManualBump, Version, VersionBump};
