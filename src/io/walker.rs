use crate::errors::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const SWIFT_EXTENSION: &str = "swift";

pub struct FileWalker {
    roots: Vec<PathBuf>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = patterns
            .iter()
            .map(|p| glob::Pattern::new(p).map_err(Error::from))
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Swift files under every root, sorted and deduplicated. A root that is
    /// itself a file is always kept, whatever its extension.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for root in &self.roots {
            if root.is_file() {
                files.push(root.clone());
                continue;
            }
            if !root.exists() {
                return Err(Error::file_system(
                    format!("{} does not exist", root.display()),
                    root.clone(),
                ));
            }

            let walker = WalkBuilder::new(root)
                .hidden(false)
                .git_ignore(true)
                .build();
            for entry in walker {
                let entry = entry?;
                let path = entry.path();
                if path.is_file() && self.should_process(root, path) {
                    files.push(path.to_path_buf());
                }
            }
        }
        files.sort();
        files.dedup();
        log::debug!("found {} Swift file(s)", files.len());
        Ok(files)
    }

    fn should_process(&self, root: &Path, path: &Path) -> bool {
        let is_swift = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SWIFT_EXTENSION));
        is_swift && !self.is_ignored(root, path)
    }

    fn is_ignored(&self, root: &Path, path: &Path) -> bool {
        let relative = path.strip_prefix(root).unwrap_or(path);
        self.ignore_patterns
            .iter()
            .any(|pattern| pattern.matches_path(relative) || pattern.matches_path(path))
    }
}

pub fn find_swift_files(root: &Path) -> Result<Vec<PathBuf>> {
    FileWalker::new(vec![root.to_path_buf()]).walk()
}
