//! Flat file page store: one `<title>.txt` per page

mod error;
mod page;

pub use error::{StoreError, StoreResult};
pub use page::Page;

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name suffix of every stored page
pub const PAGE_SUFFIX: &str = ".txt";

/// Reads and writes pages in a single directory.
///
/// The store keeps no state besides the directory path; every call goes to
/// the filesystem, so concurrent requests see last-writer-wins semantics.
#[derive(Debug, Clone)]
pub struct PageStore {
    data_dir: PathBuf,
}

impl PageStore {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Create the data directory (owner-only) if it does not exist yet
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        if self.data_dir.is_dir() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(&self.data_dir)
    }

    /// On-disk location of a page. The title must already be validated.
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.data_dir.join(format!("{}{}", title, PAGE_SUFFIX))
    }

    /// Load a page
    pub fn load(&self, title: &str) -> StoreResult<Page> {
        let body = fs::read(self.page_path(title)).map_err(|source| StoreError::NotFound {
            title: title.to_string(),
            source,
        })?;
        Ok(Page::new(title, body))
    }

    /// Create or overwrite a page, readable and writable by the owner only.
    ///
    /// The file is truncated and rewritten in place: a concurrent `load` may
    /// observe a partially written body.
    pub fn save(&self, title: &str, body: &[u8]) -> StoreResult<()> {
        let write_err = |source| StoreError::Write {
            title: title.to_string(),
            source,
        };

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(self.page_path(title)).map_err(write_err)?;
        file.write_all(body).map_err(write_err)?;
        Ok(())
    }

    /// Titles of all stored pages, sorted by file name
    pub fn list(&self) -> StoreResult<Vec<String>> {
        let mut titles = Vec::new();
        for entry in fs::read_dir(&self.data_dir).map_err(StoreError::List)? {
            let entry = entry.map_err(StoreError::List)?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(title) = name.strip_suffix(PAGE_SUFFIX) {
                if !title.is_empty() {
                    titles.push(title.to_string());
                }
            }
        }
        titles.sort();
        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_store() -> (TempDir, PageStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(temp_dir.path());
        (temp_dir, store)
    }

    #[test]
    fn test_save_then_load() {
        let (_temp, store) = setup_store();

        store.save("Alpha", b"hello").unwrap();
        let page = store.load("Alpha").unwrap();
        assert_eq!(page.title, "Alpha");
        assert_eq!(page.body, b"hello");
    }

    #[test]
    fn test_save_empty_body() {
        let (_temp, store) = setup_store();

        store.save("Empty", b"").unwrap();
        let page = store.load("Empty").unwrap();
        assert!(page.body.is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let (_temp, store) = setup_store();

        store.save("Alpha", b"a much longer first version").unwrap();
        store.save("Alpha", b"short").unwrap();
        assert_eq!(store.load("Alpha").unwrap().body, b"short");
    }

    #[test]
    fn test_page_file_layout() {
        let (temp, store) = setup_store();

        store.save("Layout1", b"raw bytes\n").unwrap();
        let on_disk = fs::read(temp.path().join("Layout1.txt")).unwrap();
        assert_eq!(on_disk, b"raw bytes\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let (_temp, store) = setup_store();

        store.save("Secret", b"x").unwrap();
        let mode = fs::metadata(store.page_path("Secret")).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(mode & 0o600, 0o600);
    }

    #[test]
    fn test_load_missing() {
        let (_temp, store) = setup_store();

        let result = store.load("Missing");
        assert!(matches!(result, Err(StoreError::NotFound { ref title, .. }) if title == "Missing"));
    }

    #[test]
    fn test_save_into_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(temp_dir.path().join("nope"));

        let result = store.save("Alpha", b"hello");
        assert!(matches!(result, Err(StoreError::Write { .. })));
    }

    #[test]
    fn test_list_empty() {
        let (_temp, store) = setup_store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_strips_suffix_and_skips_others() {
        let (temp, store) = setup_store();

        store.save("Beta", b"b").unwrap();
        store.save("Alpha", b"a").unwrap();
        fs::write(temp.path().join("notes.md"), b"ignored").unwrap();
        fs::write(temp.path().join(".txt"), b"no stem").unwrap();

        assert_eq!(store.list().unwrap(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_list_missing_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(temp_dir.path().join("nope"));

        assert!(matches!(store.list(), Err(StoreError::List(_))));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = PageStore::new(temp_dir.path().join("a").join("b"));

        store.ensure_dir().unwrap();
        assert!(store.data_dir().is_dir());
        // Idempotent
        store.ensure_dir().unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
