//! Filesystem collaborators used by the batch driver.
//!
//! Input access goes through traits so a batch can run against something other than the
//! real disk.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Turns a possibly-relative argument into an absolute path.
pub trait PathResolver {
    /// Absolute form of `path`, or why there is none.
    fn resolve(&self, path: &Path) -> io::Result<PathBuf>;
}

/// Reads a whole document into memory.
pub trait ByteSource {
    /// Every byte of the document at `path`.
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Resolves relative paths against the process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentDirResolver;

impl PathResolver for CurrentDirResolver {
    fn resolve(&self, path: &Path) -> io::Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        std::path::absolute(path)
    }
}

/// Reads documents from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl ByteSource for FileSource {
    fn read_all(&self, path: &Path) -> io::Result<Vec<u8>> {
        // the handle is closed when `file` drops, on success and on error
        let mut file = File::open(path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

/// Output file whose `flush` also pushes the written bytes to disk.
#[derive(Debug)]
pub struct SyncedFile(File);

impl SyncedFile {
    /// Create `path`, truncating anything already there.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        File::create(path).map(SyncedFile)
    }
}

impl Write for SyncedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()?;
        self.0.sync_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_pass_through() {
        let abs = std::env::temp_dir().join("level1.tmx");
        assert_eq!(CurrentDirResolver.resolve(&abs).expect("resolve"), abs);
    }

    #[test]
    fn relative_paths_become_absolute() {
        let resolved = CurrentDirResolver
            .resolve(Path::new("maps/level1.tmx"))
            .expect("resolve");
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("maps/level1.tmx"));
    }

    #[test]
    fn empty_path_cannot_be_resolved() {
        assert!(CurrentDirResolver.resolve(Path::new("")).is_err());
    }

    #[test]
    fn synced_file_truncates_on_create() {
        let path = std::env::temp_dir().join(format!("tmx2c_synced_{}.h", std::process::id()));
        std::fs::write(&path, "stale content that must go").expect("seed");

        let mut out = SyncedFile::create(&path).expect("create");
        out.write_all(b"#endif\n").expect("write");
        out.flush().expect("flush");
        drop(out);

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "#endif\n");
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let missing = std::env::temp_dir().join("tmx2c_definitely_missing.tmx");
        let err = FileSource.read_all(&missing).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
