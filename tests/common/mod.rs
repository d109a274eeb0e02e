//! Common test utilities for bits-migrate integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Repository, RepositoryInitOptions, Signature};
use serde_json::Value;
use tempfile::TempDir;

/// A scratch directory holding state files, app sources and the bits root
pub struct TestWorkspace {
    pub temp: TempDir,
    pub path: PathBuf,
}

impl TestWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
        file_path
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).expect("Failed to read file")
    }

    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a single-instance state file with the given attributes
    pub fn write_state(&self, name: &str, id: &str, attributes: &[(&str, &str)]) -> PathBuf {
        let attributes: serde_json::Map<String, Value> = attributes
            .iter()
            .map(|(k, v)| ((*k).to_string(), Value::String((*v).to_string())))
            .collect();
        let state = serde_json::json!({ "id": id, "attributes": attributes });
        self.write_file(name, &serde_json::to_string_pretty(&state).expect("valid json"))
    }

    /// Read a state file as JSON
    pub fn read_state(&self, name: &str) -> Value {
        serde_json::from_str(&self.read_file(name)).expect("Failed to parse state file")
    }

    /// Create an application directory with a couple of files
    pub fn create_app(&self, name: &str) -> PathBuf {
        self.write_file(&format!("{name}/index.html"), "<h1>hello</h1>");
        self.write_file(&format!("{name}/static/site.css"), "body {}");
        self.path.join(name)
    }

    /// Create a git repository with one commit on `main`
    pub fn create_git_repo(&self, name: &str) -> PathBuf {
        let path = self.path.join(name);
        let mut options = RepositoryInitOptions::new();
        options.initial_head("main");
        let repo = Repository::init_opts(&path, &options).expect("Failed to init repository");
        commit(&repo, "index.html", "<h1>from git</h1>");
        path
    }

    pub fn bits_dir(&self) -> PathBuf {
        self.path.join("bits")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Commit `content` as `name` on HEAD
pub fn commit(repo: &Repository, name: &str, content: &str) {
    let workdir = repo.workdir().expect("work tree");
    std::fs::write(workdir.join(name), content).expect("Failed to write file");

    let mut index = repo.index().expect("index");
    index.add_path(Path::new(name)).expect("Failed to stage");
    index.write().expect("Failed to write index");
    let tree = repo
        .find_tree(index.write_tree().expect("tree"))
        .expect("tree");
    let sig = Signature::now("Test", "test@test.com").expect("signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "commit", &tree, &parents)
        .expect("Failed to commit");
}

/// Names of the entries in a zip archive
pub fn zip_entries(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).expect("Failed to open archive");
    let zip = zip::ZipArchive::new(file).expect("Invalid zip archive");
    let mut names: Vec<String> = zip.file_names().map(str::to_string).collect();
    names.sort();
    names
}
