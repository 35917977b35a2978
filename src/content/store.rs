//! Where content files come from

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only access to a flat set of named content files
pub trait ContentStore {
    /// Names of every file in the store, in a stable order.
    /// A store that does not exist is empty.
    fn list_names(&self) -> io::Result<Vec<String>>;

    /// Contents of one file
    fn read(&self, name: &str) -> io::Result<String>;
}

/// Content files in a single directory (not recursive)
#[derive(Debug, Clone)]
pub struct FsStore {
    dir: PathBuf,
}

impl FsStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }
}

impl ContentStore for FsStore {
    fn list_names(&self) -> io::Result<Vec<String>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => tracing::warn!("Skipping non UTF-8 file name {:?}", entry.path()),
            }
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> io::Result<String> {
        // Names never address anything outside the store
        if name.contains(['/', '\\']) || name == ".." {
            return Err(io::Error::new(io::ErrorKind::NotFound, name.to_string()));
        }
        fs::read_to_string(self.dir.join(name))
    }
}
