//! Directory-backed vault implementing [`FileStore`] and [`DailyNoteIndex`].
//!
//! Layout:
//! ```text
//! root/
//! ├── <daily_note_folder>/
//! │   ├── 2024-01-01.md
//! │   └── ...
//! └── attachments, other notes ...
//! ```

use super::{
    daily_note_key, DailyNoteIndex, DailyNoteMap, FileHandle, FileStore, HostError, HostResult,
};
use chrono::NaiveDate;
use log::{debug, info};
use std::fs;
use std::path::{Component, Path, PathBuf};

const DAILY_NOTE_FILE_FORMAT: &str = "%Y-%m-%d";
const NOTE_EXTENSION: &str = "md";

/// Plain-directory note host.
#[derive(Debug, Clone)]
pub struct FsVault {
    root: PathBuf,
    daily_note_folder: String,
    daily_note_template: String,
}

impl FsVault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            daily_note_folder: String::new(),
            daily_note_template: String::new(),
        }
    }

    /// Stores daily notes under `folder` (vault-relative, `/`-separated).
    pub fn with_daily_note_folder(mut self, folder: impl Into<String>) -> Self {
        self.daily_note_folder = folder.into().trim_matches('/').to_string();
        self
    }

    /// Initial content written into newly created daily notes.
    pub fn with_daily_note_template(mut self, template: impl Into<String>) -> Self {
        self.daily_note_template = template.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn absolute(&self, file: &FileHandle) -> PathBuf {
        self.root.join(&file.path)
    }

    fn daily_note_handle(&self, date: NaiveDate) -> FileHandle {
        let name = format!("{}.{NOTE_EXTENSION}", date.format(DAILY_NOTE_FILE_FORMAT));
        if self.daily_note_folder.is_empty() {
            FileHandle::new(name)
        } else {
            FileHandle::new(format!("{}/{name}", self.daily_note_folder))
        }
    }

    fn handle_for(&self, absolute: &Path) -> Option<FileHandle> {
        let relative = absolute.strip_prefix(&self.root).ok()?;
        let parts = relative
            .components()
            .map(|component| match component {
                Component::Normal(part) => part.to_str().map(str::to_string),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(FileHandle::new(parts.join("/")))
    }

    fn find_by_name(&self, name: &str) -> Option<FileHandle> {
        let mut matches = Vec::new();
        collect_named_files(&self.root, name, &mut matches);
        // Shortest path wins, mirroring "closest to vault root" resolution.
        matches.sort_by(|a, b| {
            a.components()
                .count()
                .cmp(&b.components().count())
                .then_with(|| a.cmp(b))
        });
        matches.first().and_then(|path| self.handle_for(path))
    }
}

impl FileStore for FsVault {
    fn read_file(&self, file: &FileHandle) -> HostResult<String> {
        fs::read_to_string(self.absolute(file)).map_err(|source| {
            if source.kind() == std::io::ErrorKind::InvalidData {
                HostError::InvalidData(format!("`{}` is not valid UTF-8", file.path))
            } else {
                HostError::Io {
                    path: file.path.clone(),
                    source,
                }
            }
        })
    }

    fn write_file(&self, file: &FileHandle, content: &str) -> HostResult<()> {
        let target = self.absolute(file);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| HostError::Io {
                path: file.path.clone(),
                source,
            })?;
        }
        fs::write(&target, content).map_err(|source| HostError::Io {
            path: file.path.clone(),
            source,
        })
    }

    fn resolve_link_path(&self, link: &str, context_path: &str) -> Option<FileHandle> {
        let target = link.split('#').next().unwrap_or_default().trim();
        if target.is_empty() || is_escaping(target) {
            return None;
        }

        let mut candidates = Vec::new();
        let context_dir = Path::new(context_path).parent().unwrap_or(Path::new(""));
        candidates.push(self.root.join(context_dir).join(target));
        candidates.push(self.root.join(target));
        if Path::new(target).extension().is_none() {
            let with_ext = format!("{target}.{NOTE_EXTENSION}");
            candidates.push(self.root.join(context_dir).join(&with_ext));
            candidates.push(self.root.join(&with_ext));
        }

        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            return self.handle_for(found);
        }

        let base = Path::new(target).file_name()?.to_str()?;
        let resolved = self.find_by_name(base).or_else(|| {
            if Path::new(base).extension().is_none() {
                self.find_by_name(&format!("{base}.{NOTE_EXTENSION}"))
            } else {
                None
            }
        });
        if resolved.is_none() {
            debug!("event=link_resolve module=vault status=unresolved");
        }
        resolved
    }

    fn resource_path(&self, file: &FileHandle) -> String {
        format!("file://{}", self.absolute(file).display())
    }
}

impl DailyNoteIndex for FsVault {
    fn list_all(&self) -> HostResult<DailyNoteMap> {
        let folder = self.root.join(&self.daily_note_folder);
        let mut index = DailyNoteMap::new();
        let entries = match fs::read_dir(&folder) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(index),
            Err(source) => {
                return Err(HostError::Io {
                    path: self.daily_note_folder.clone(),
                    source,
                })
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(date) = daily_note_date(&path) else {
                continue;
            };
            if let Some(handle) = self.handle_for(&path) {
                index.insert(daily_note_key(date), handle);
            }
        }

        Ok(index)
    }

    fn create_for_date(&self, date: NaiveDate) -> HostResult<FileHandle> {
        let handle = self.daily_note_handle(date);
        if !self.absolute(&handle).exists() {
            self.write_file(&handle, &self.daily_note_template)?;
            info!(
                "event=daily_note_create module=vault status=ok date={}",
                date.format(DAILY_NOTE_FILE_FORMAT)
            );
        }
        Ok(handle)
    }
}

fn daily_note_date(path: &Path) -> Option<NaiveDate> {
    if path.extension()?.to_str()? != NOTE_EXTENSION {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    NaiveDate::parse_from_str(stem, DAILY_NOTE_FILE_FORMAT).ok()
}

fn is_escaping(target: &str) -> bool {
    Path::new(target)
        .components()
        .any(|component| matches!(component, Component::ParentDir | Component::RootDir))
}

fn collect_named_files(dir: &Path, name: &str, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            let hidden = path
                .file_name()
                .and_then(|value| value.to_str())
                .is_some_and(|value| value.starts_with('.'));
            if !hidden {
                collect_named_files(&path, name, found);
            }
        } else if path.file_name().and_then(|value| value.to_str()) == Some(name) {
            found.push(path);
        }
    }
}
