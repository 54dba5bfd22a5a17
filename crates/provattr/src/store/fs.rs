use super::AttributeStore;
use crate::changes::{AttrMap, ChangeSet};
use crate::entry::{EntryKind, EntryRef};
use crate::error::{ProvError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// On-disk form of one entry.
#[derive(Debug, Serialize, Deserialize)]
struct EntryDocument {
    entry: EntryRef,
    #[serde(default)]
    attrs: AttrMap,
}

/// File-backed store: `<root>/<kind>/<name>.json`.
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: EntryKind) -> PathBuf {
        self.root.join(kind.as_str())
    }

    fn entry_path(&self, entry: &EntryRef) -> Result<PathBuf> {
        let name = &entry.name;
        if name.is_empty()
            || name.starts_with('.')
            || name.contains(['/', '\\'])
        {
            return Err(ProvError::InvalidEntry(name.clone()));
        }
        Ok(self.kind_dir(entry.kind).join(format!("{}.json", name)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(ProvError::Io)?;
        }
        Ok(())
    }

    fn load(&self, entry: &EntryRef) -> Result<AttrMap> {
        let path = self.entry_path(entry)?;
        if !path.exists() {
            return Ok(AttrMap::new());
        }
        let content = fs::read_to_string(path).map_err(ProvError::Io)?;
        let doc: EntryDocument =
            serde_json::from_str(&content).map_err(ProvError::Serialization)?;
        Ok(doc.attrs)
    }

    fn save(&self, entry: &EntryRef, attrs: AttrMap) -> Result<()> {
        let path = self.entry_path(entry)?;
        let dir = self.kind_dir(entry.kind);
        self.ensure_dir(&dir)?;

        let doc = EntryDocument {
            entry: entry.clone(),
            attrs,
        };
        let content = serde_json::to_string_pretty(&doc).map_err(ProvError::Serialization)?;

        // Atomic write
        let tmp_path = dir.join(format!(".entry-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_path, content).map_err(ProvError::Io)?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            ProvError::Io(e)
        })?;
        Ok(())
    }
}

impl AttributeStore for FileStore {
    fn attributes(&self, entry: &EntryRef) -> Result<AttrMap> {
        self.load(entry)
    }

    fn commit(&self, entry: &EntryRef, changes: &ChangeSet) -> Result<()> {
        let mut attrs = self.load(entry)?;
        changes.apply(&mut attrs);
        self.save(entry, attrs)
    }

    fn entries(&self, kind: EntryKind) -> Result<Vec<EntryRef>> {
        let dir = self.kind_dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut refs = Vec::new();
        for item in fs::read_dir(&dir).map_err(ProvError::Io)? {
            let path = item.map_err(ProvError::Io)?.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
                if !name.starts_with('.') {
                    refs.push(EntryRef::new(kind, name));
                }
            }
        }
        refs.sort();
        Ok(refs)
    }
}
