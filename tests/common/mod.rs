//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use git2::{Oid, Repository, Signature};
use prscout::tools::ToolContext;

/// Name of the branch tests compare against.
pub const BASE_BRANCH: &str = "base";

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Get the test signature for commits.
    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write `files` and commit them on HEAD. Returns the commit OID.
    pub fn commit_files(&self, message: &str, files: &[(&str, &str)]) -> Oid {
        let mut index = self.repo.index().expect("Failed to get index");
        for (name, content) in files {
            let file_path = self.path().join(name);
            if let Some(parent) = file_path.parent() {
                std::fs::create_dir_all(parent).expect("Failed to create parent directory");
            }
            std::fs::write(&file_path, content).expect("Failed to write test file");
            index.add_path(Path::new(name)).expect("Failed to add file");
        }
        index.write().expect("Failed to write index");
        self.commit_index(message)
    }

    /// Delete `name` from the work tree and commit. Returns the commit OID.
    pub fn remove_file(&self, message: &str, name: &str) -> Oid {
        std::fs::remove_file(self.path().join(name)).expect("Failed to remove test file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.remove_path(Path::new(name)).expect("Failed to remove file from index");
        index.write().expect("Failed to write index");
        self.commit_index(message)
    }

    fn commit_index(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        // Get parent commit if exists
        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Create a branch pointing to the given OID.
    pub fn branch(&self, name: &str, oid: Oid) {
        let commit = self.repo.find_commit(oid).expect("Failed to find commit");
        self.repo.branch(name, &commit, false).expect("Failed to create branch");
    }

    /// Tool context for this repository with templates in `<repo>/templates`.
    pub fn context(&self) -> ToolContext {
        ToolContext::new(self.path(), self.templates_dir(), Duration::from_secs(30))
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.path().join("templates")
    }
}

/// Repository with a base commit on [`BASE_BRANCH`] and one feature commit on HEAD
/// that adds `src/widget.rs` and edits `README.md`, followed by a commit that
/// deletes `src/legacy.rs`.
pub fn repo_with_feature_branch(feature_message: &str) -> TestRepo {
    let test_repo = TestRepo::new();
    let base = test_repo.commit_files(
        "chore: initial import",
        &[("README.md", "# Demo\n"), ("src/legacy.rs", "// retired helpers\npub const LEGACY: u8 = 1;\n")],
    );
    test_repo.branch(BASE_BRANCH, base);

    test_repo.commit_files(
        feature_message,
        &[
            ("src/widget.rs", "pub fn widget() {}\n"),
            ("README.md", "# Demo\n\nNow with widgets.\n"),
        ],
    );
    test_repo.remove_file("chore: drop legacy module", "src/legacy.rs");
    test_repo
}
