//! Common test utilities for sprout integration tests

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory holding the workspace and any fixture repos
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestWorkspace {
    /// Create a new test workspace named `project` inside a temp directory
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().join("project");
        std::fs::create_dir_all(&path).expect("Failed to create workspace directory");
        Self { temp, path }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write sprout.yaml listing the given module references
    pub fn write_config(&self, modules: &[&str]) {
        let mut yaml = String::from("modules:\n");
        for reference in modules {
            yaml.push_str(&format!("  - {}\n", reference));
        }
        if modules.is_empty() {
            yaml = "modules: []\n".to_string();
        }
        self.write_file("sprout.yaml", &yaml);
    }

    /// Create a placed module directory directly on disk, bypassing git
    pub fn create_module(&self, rel: &str, manifest: Option<&str>) -> PathBuf {
        let dir = self.path.join(rel);
        std::fs::create_dir_all(&dir).expect("Failed to create module directory");
        if let Some(content) = manifest {
            std::fs::write(dir.join("module.yaml"), content).expect("Failed to write manifest");
        }
        dir
    }

    /// Directory for fixture remote repositories, outside the workspace
    pub fn remotes_dir(&self) -> PathBuf {
        let dir = self.temp.path().join("remotes");
        std::fs::create_dir_all(&dir).expect("Failed to create remotes directory");
        dir
    }
}

/// Build a local git repository usable as a module reference.
///
/// Writes the given files, commits everything, and returns the repository
/// path as a string reference that sprout can clone from.
#[allow(dead_code)]
pub fn module_repo(dir: &Path, files: &[(&str, &str)]) -> String {
    std::fs::create_dir_all(dir).expect("Failed to create repository directory");
    let repo = git2::Repository::init(dir).expect("Failed to init repository");

    for (name, content) in files {
        let file_path = dir.join(name);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write repository file");
    }

    let sig = git2::Signature::now("Test", "test@test.com").expect("Failed to create signature");
    let tree_id = {
        let mut index = repo.index().expect("Failed to open index");
        index
            .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to add files");
        index.write().expect("Failed to write index");
        index.write_tree().expect("Failed to write tree")
    };
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
        .expect("Failed to commit");

    dir.to_string_lossy().into_owned()
}
