//! JSON-backed match record storage
//!
//! All match records are kept in a single file, as a JSON array of
//! [`Match`] objects. Every operation reads or writes the whole file;
//! nothing is cached between calls.
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::matches::Match;

/// Match record storage errors
#[derive(Debug)]
#[derive(thiserror::Error)]
pub enum StoreError {
    /// The database file could not be read
    #[error("Database read error")]
    Read(#[source] std::io::Error),

    /// The database file could not be written
    #[error("Database write error")]
    Write(#[source] std::io::Error),

    /// The database file does not contain a list of matches
    #[error("Database format error")]
    Format(#[source] serde_json::Error),
}

impl PartialEq for StoreError {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// A match record database, stored as a single JSON file
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store backed by the file at `path`
    ///
    /// The file is not touched until the store is used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty database, replacing any existing content
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.write_all(Vec::new()).map(|_| ())
    }

    /// Read all match records, in insertion order
    pub fn read_all(&self) -> Result<Vec<Match>, StoreError> {
        log::debug!("Reading matches from {}", self.path.display());
        let data = std::fs::read(&self.path).map_err(StoreError::Read)?;
        serde_json::from_slice(&data).map_err(StoreError::Format)
    }

    /// Replace all match records with `matches`
    ///
    /// The new content is written to a temporary file next to the
    /// database, which then replaces the database file. If this fails,
    /// the previous content is left in place. An existing database keeps
    /// its permissions.
    pub fn write_all(&self, matches: Vec<Match>) -> Result<Vec<Match>, StoreError> {
        log::debug!(
            "Writing {} matches to {}",
            matches.len(),
            self.path.display()
        );
        let data = serde_json::to_vec_pretty(&matches).map_err(|e| StoreError::Write(e.into()))?;
        let mut file = tempfile::NamedTempFile::new_in(self.directory()).map_err(StoreError::Write)?;
        file.write_all(&data).map_err(StoreError::Write)?;
        if let Ok(metadata) = std::fs::metadata(&self.path) {
            file.as_file()
                .set_permissions(metadata.permissions())
                .map_err(StoreError::Write)?;
        }
        file.as_file().sync_all().map_err(StoreError::Write)?;
        file.persist(&self.path)
            .map_err(|e| StoreError::Write(e.error))?;
        Ok(matches)
    }

    /// The directory containing the database file
    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::Team;
    use pretty_assertions::assert_eq;

    fn get_test_matches() -> Vec<Match> {
        vec![
            Match::new(Team::new("lions", 3), Team::new("snakes", 3)),
            Match::new(Team::new("tarantulas", 1), Team::new("FC awesome", 0)),
        ]
    }

    #[test]
    fn initialize() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("ranking.json"));
        store.initialize().expect("a writable path should initialize");
        assert_eq!(store.read_all().unwrap(), vec![]);

        store.write_all(get_test_matches()).unwrap();
        store.initialize().expect("initialization should reset content");
        assert_eq!(store.read_all().unwrap(), vec![]);
    }

    #[test]
    fn round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("ranking.json"));
        let written = store.write_all(get_test_matches()).unwrap();
        assert_eq!(written, get_test_matches());
        assert_eq!(store.read_all().unwrap(), get_test_matches());
    }

    #[test]
    fn read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("ranking.json"));
        let error = store.read_all().expect_err("a missing file should not be readable");
        assert_eq!(error, StoreError::Read(std::io::ErrorKind::NotFound.into()));
    }

    #[test]
    fn read_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        let store = Store::new(&path);
        for content in [
            "",
            "{}",
            "[{\"team_1\": {\"name\": \"lions\"}}]",
            "[1, 2, 3]",
        ] {
            std::fs::write(&path, content).unwrap();
            let error = store
                .read_all()
                .expect_err("malformed data should not be silently accepted");
            assert_eq!(
                error,
                StoreError::Format(serde_json::from_str::<()>("x").unwrap_err())
            );
        }
    }

    #[test]
    fn write_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("missing").join("ranking.json"));
        let error = store
            .write_all(get_test_matches())
            .expect_err("a missing directory should not be writable");
        assert_eq!(error, StoreError::Write(std::io::ErrorKind::NotFound.into()));
        assert_eq!(
            store.initialize(),
            Err(StoreError::Write(std::io::ErrorKind::NotFound.into()))
        );
    }

    #[test]
    fn write_failure_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();
        let store = Store::new(&path);
        let error = store
            .write_all(get_test_matches())
            .expect_err("a directory should not be replaced");
        assert!(matches!(error, StoreError::Write(_)));
        assert!(path.join("keep").exists());
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        std::fs::write(&path, "[]").unwrap();
        for mode in [0o644, 0o640] {
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
            let store = Store::new(&path);
            store.write_all(get_test_matches()).unwrap();
            let metadata = std::fs::metadata(&path).unwrap();
            assert_eq!(metadata.permissions().mode() & 0o777, mode);
            assert_eq!(store.read_all().unwrap(), get_test_matches());
        }
    }

    #[test]
    fn json_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranking.json");
        let store = Store::new(&path);
        store.write_all(get_test_matches()).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&raw).unwrap(),
            serde_json::json!([
                {"team_1": {"name": "lions", "goals": 3}, "team_2": {"name": "snakes", "goals": 3}},
                {"team_1": {"name": "tarantulas", "goals": 1}, "team_2": {"name": "FC awesome", "goals": 0}},
            ])
        );
    }

    #[test]
    fn relative_path() {
        let store = Store::new("ranking.json");
        assert_eq!(store.directory(), Path::new("."));
        assert_eq!(store.path(), Path::new("ranking.json"));
    }
}
