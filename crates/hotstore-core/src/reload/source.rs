//! Where a reloading store reads its bytes and modification time from

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Backing storage of a reloading store
///
/// `FileSource` is the normal implementation; tests and embedders can supply
/// their own (e.g. a blob fetched from a secret manager with a version time).
pub trait StoreSource: Send + Sync {
    /// Current modification time of the backing data
    fn modified(&self) -> std::io::Result<SystemTime>;

    /// Open the backing data for reading
    fn open(&self) -> std::io::Result<Box<dyn Read + Send>>;
}

/// A store file on the local filesystem
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StoreSource for FileSource {
    fn modified(&self) -> std::io::Result<SystemTime> {
        std::fs::metadata(&self.path)?.modified()
    }

    fn open(&self) -> std::io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(BufReader::new(File::open(&self.path)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::tempdir;

    #[test]
    fn test_file_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.yaml");
        std::fs::write(&path, "entries: []").unwrap();

        let mtime = UNIX_EPOCH + Duration::from_secs(1000);
        File::options().write(true).open(&path).unwrap().set_modified(mtime).unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.modified().unwrap(), mtime);

        let mut content = String::new();
        source.open().unwrap().read_to_string(&mut content).unwrap();
        assert_eq!(content, "entries: []");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.yaml"));
        assert!(source.modified().is_err());
        assert!(source.open().is_err());
    }
}
