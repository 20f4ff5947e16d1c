//! JSON-file storage backend
//!
//! Stores one pretty-printed JSON document per crawled page, named after the
//! page URL, plus a single `site_info.json`. The filename scheme (protocol
//! prefix stripped, every non-alphanumeric character replaced by `_`) is a
//! compatibility requirement and must not change.

use crate::storage::{PageRecord, SiteInfo, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const SITE_INFO_FILE: &str = "site_info.json";

/// Storage backend writing one JSON document per page into a directory
#[derive(Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Opens (or creates) a store rooted at `dir`
    ///
    /// Fails with [`StorageError::NotWritable`] when the directory cannot be
    /// created, so an unusable storage location is caught before any crawling
    /// begins.
    pub fn new(dir: &Path) -> StorageResult<Self> {
        fs::create_dir_all(dir)
            .map_err(|e| StorageError::NotWritable(format!("{}: {}", dir.display(), e)))?;

        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Converts a page URL to its storage filename
    ///
    /// The protocol prefix is stripped and every remaining non-alphanumeric
    /// character becomes `_`, e.g. `https://docs.example.com/users` maps to
    /// `docs_example_com_users.json`.
    fn url_to_filename(url: &str) -> String {
        let stripped = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);

        let mangled: String = stripped
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();

        format!("{}.json", mangled)
    }

    fn page_path(&self, url: &str) -> PathBuf {
        self.dir.join(Self::url_to_filename(url))
    }
}

impl Storage for JsonStore {
    fn save_site_info(&self, info: &SiteInfo) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(info)?;
        fs::write(self.dir.join(SITE_INFO_FILE), json)?;
        Ok(())
    }

    fn get_site_info(&self) -> StorageResult<Option<SiteInfo>> {
        let path = self.dir.join(SITE_INFO_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save_page(&self, page: &PageRecord) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(page)?;
        fs::write(self.page_path(&page.url), json)?;
        Ok(())
    }

    fn get_page(&self, url: &str) -> StorageResult<Option<PageRecord>> {
        let path = self.page_path(url);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn list_page_urls(&self) -> StorageResult<Vec<String>> {
        let mut urls = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let name = name.to_string_lossy();

            if !name.ends_with(".json") || name == SITE_INFO_FILE {
                continue;
            }

            // The filename mangling is lossy, so the key is read back from
            // the document itself.
            let content = fs::read_to_string(entry.path())?;
            let page: PageRecord = serde_json::from_str(&content)?;
            urls.push(page.url);
        }

        urls.sort();
        Ok(urls)
    }

    fn generate_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn empty_page(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            title: "Title".to_string(),
            content: "<html></html>".to_string(),
            endpoints: vec![],
            schemas: vec![],
            last_crawled: Utc::now(),
        }
    }

    #[test]
    fn test_url_to_filename() {
        assert_eq!(
            JsonStore::url_to_filename("https://docs.example.com/api/users"),
            "docs_example_com_api_users.json"
        );
        assert_eq!(
            JsonStore::url_to_filename("http://example.com/"),
            "example_com_.json"
        );
    }

    #[test]
    fn test_save_and_get_page() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        let page = empty_page("https://docs.example.com/users");
        store.save_page(&page).unwrap();

        let loaded = store.get_page("https://docs.example.com/users").unwrap();
        assert!(loaded.is_some());
        assert_eq!(loaded.unwrap().title, "Title");
    }

    #[test]
    fn test_get_missing_page() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        let loaded = store.get_page("https://docs.example.com/missing").unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_page_overwrites() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        let url = "https://docs.example.com/users";
        store.save_page(&empty_page(url)).unwrap();

        let mut updated = empty_page(url);
        updated.title = "Updated".to_string();
        store.save_page(&updated).unwrap();

        assert_eq!(store.get_page(url).unwrap().unwrap().title, "Updated");
        assert_eq!(store.list_page_urls().unwrap().len(), 1);
    }

    #[test]
    fn test_list_page_urls_excludes_site_info() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        store.save_page(&empty_page("https://docs.example.com/a")).unwrap();
        store.save_page(&empty_page("https://docs.example.com/b")).unwrap();
        store
            .save_site_info(&SiteInfo {
                base_url: "https://docs.example.com".to_string(),
                title: "Docs".to_string(),
                last_crawled: Utc::now(),
            })
            .unwrap();

        let urls = store.list_page_urls().unwrap();
        assert_eq!(
            urls,
            vec![
                "https://docs.example.com/a".to_string(),
                "https://docs.example.com/b".to_string()
            ]
        );
    }

    #[test]
    fn test_site_info_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        assert!(store.get_site_info().unwrap().is_none());

        store
            .save_site_info(&SiteInfo {
                base_url: "https://docs.example.com".to_string(),
                title: "Example Docs".to_string(),
                last_crawled: Utc::now(),
            })
            .unwrap();

        let info = store.get_site_info().unwrap().unwrap();
        assert_eq!(info.title, "Example Docs");
    }

    #[test]
    fn test_generate_id_unique() {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::new(dir.path()).unwrap();

        assert_ne!(store.generate_id(), store.generate_id());
    }
}
