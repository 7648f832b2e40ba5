//! Isolated test environment with a temporary database.

// Not every integration test binary uses every helper.
#![allow(dead_code)]

use super::KvaultCommand;
use kvault::store::SqliteStore;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary database and config file.
///
/// The temp directory is cleaned up on drop. Commands built from the
/// environment never touch the user's real database or config.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the temp directory root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the database path used by commands from this environment.
    pub fn db_path(&self) -> PathBuf {
        self.root.join("data").join("kvault.db")
    }

    /// Returns the config path used by commands from this environment.
    ///
    /// The file does not exist until [`TestEnv::write_config`] is called.
    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Writes the config file.
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_path(), content).expect("Failed to write config");
    }

    /// Opens the environment's database directly for seeding and inspection.
    pub fn store(&self) -> SqliteStore {
        SqliteStore::open(&self.db_path()).expect("Failed to open test database")
    }

    /// Creates a KvaultCommand configured for this test environment.
    pub fn cmd(&self) -> KvaultCommand {
        KvaultCommand::new()
            .db(&self.db_path())
            .config(&self.config_path())
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kvault::store::NoteStore;

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_db_path_is_inside_root() {
        let env = TestEnv::new();
        assert!(env.db_path().starts_with(env.root()));
        assert!(!env.db_path().exists());
    }

    #[test]
    fn test_env_store_creates_database() {
        let env = TestEnv::new();
        let mut store = env.store();
        store.create_note("Seeded", "", None).unwrap();
        store.close().unwrap();
        assert!(env.db_path().exists());
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--db");
        assert_eq!(args[1], env.db_path().to_string_lossy());
        assert_eq!(args[2], "--config");
    }
}
