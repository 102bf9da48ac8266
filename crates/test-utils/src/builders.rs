#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use speech_installer::config::{InstallerConfig, Sources};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;

/// Builder for `InstallerConfig` to simplify test setup.
pub struct ConfigBuilder {
    config: InstallerConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: InstallerConfig::default(),
        }
    }

    pub fn git_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.git_path = path.into();
        self
    }

    pub fn python_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.python_path = path.into();
        self
    }

    pub fn checked(mut self, val: bool) -> Self {
        self.config.is_check = val;
        self
    }

    pub fn torch_packages(mut self, packages: &[&str]) -> Self {
        self.config.sources.torch_packages = packages.iter().map(|p| p.to_string()).collect();
        self
    }

    pub fn sources(mut self, sources: Sources) -> Self {
        self.config.sources = sources;
        self
    }

    pub fn command_timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeouts.command_secs = secs;
        self
    }

    pub fn build(self) -> InstallerConfig {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `files` (relative path, contents) under `root`, creating parents.
pub fn write_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (rel, contents) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
    }
}

/// Every file under `root`, keyed by its relative path with `/` separators.
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    for entry in WalkDir::new(root).min_depth(1) {
        let entry = entry.unwrap();
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/");
            files.insert(rel, fs::read(entry.path()).unwrap());
        }
    }
    files
}

/// Builder for small zip archives.
pub struct ZipBuilder {
    entries: Vec<ZipEntry>,
}

enum ZipEntry {
    Dir(String),
    File {
        name: String,
        contents: Vec<u8>,
        mode: u32,
    },
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn dir(mut self, name: &str) -> Self {
        self.entries.push(ZipEntry::Dir(name.to_string()));
        self
    }

    pub fn file(self, name: &str, contents: &[u8]) -> Self {
        self.file_with_mode(name, contents, 0o644)
    }

    pub fn file_with_mode(mut self, name: &str, contents: &[u8], mode: u32) -> Self {
        self.entries.push(ZipEntry::File {
            name: name.to_string(),
            contents: contents.to_vec(),
            mode,
        });
        self
    }

    pub fn write_to(self, path: &Path) {
        let file = fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);

        for entry in self.entries {
            match entry {
                ZipEntry::Dir(name) => {
                    zip.add_directory(name, SimpleFileOptions::default()).unwrap();
                }
                ZipEntry::File {
                    name,
                    contents,
                    mode,
                } => {
                    let options = SimpleFileOptions::default().unix_permissions(mode);
                    zip.start_file(name, options).unwrap();
                    zip.write_all(&contents).unwrap();
                }
            }
        }

        zip.finish().unwrap();
    }
}

impl Default for ZipBuilder {
    fn default() -> Self {
        Self::new()
    }
}
