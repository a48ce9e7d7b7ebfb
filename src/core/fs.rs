//! Filesystem access used by the scanner.
//!
//! Reading and listing go through [`SourceFs`] so the pipeline can run against
//! the real disk ([`LocalFs`]) or an in-memory tree in tests.

use std::{fs, io, path::Path};

use walkdir::WalkDir;

/// Immediate entries of one directory, each list sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
}

pub trait SourceFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    fn list_dir(&self, path: &Path) -> io::Result<DirListing>;
}

/// The local disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl SourceFs for LocalFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<DirListing> {
        let mut listing = DirListing::default();

        let walker = WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                listing.dirs.push(name);
            } else if file_type.is_file() {
                listing.files.push(name);
            } else if entry.path_is_symlink() {
                // Classify links by their target; dangling links are skipped.
                let target = entry.path();
                if target.is_dir() {
                    listing.dirs.push(name);
                } else if target.is_file() {
                    listing.files.push(name);
                }
            }
        }

        Ok(listing)
    }
}
