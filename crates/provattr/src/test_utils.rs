use crate::entry::EntryRef;
use crate::server::Server;
use crate::store::fs::FileStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// A file-backed store in a throwaway directory.
pub struct TestEnv {
    // Held so the directory lives as long as the store
    pub _temp_dir: TempDir,
    pub store: FileStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FileStore::new(root.clone());
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    pub fn server(&self, name: &str) -> Server<'_, FileStore> {
        Server::new(&self.store, name)
    }

    pub fn entry_file(&self, entry: &EntryRef) -> PathBuf {
        self.root
            .join(entry.kind.as_str())
            .join(format!("{}.json", entry.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::MailMode;

    #[test]
    fn server_writes_land_in_entry_file() {
        let env = TestEnv::new();
        let server = env.server("mail1");
        server.mail_mode().set(MailMode::Redirect).unwrap();
        assert!(env.entry_file(&EntryRef::server("mail1")).exists());

        let reopened = env.server("mail1");
        assert_eq!(reopened.mail_mode().get(), Some(MailMode::Redirect));
    }
}
