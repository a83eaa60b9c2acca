use crate::config::StorageConfig;
use crate::error::Result;
use crate::models::{ChapterMap, MangaRecord};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, info};

/// Flat-file cache: one directory per normalized name under the data root,
/// holding `index.json` (record fields) and `chapters.json` (chapter map).
///
/// A missing data root or entry is a cache miss; any other I/O error
/// propagates. There is no TTL and no invalidation: cached fields are
/// trusted indefinitely.
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            root: PathBuf::from(&config.data_root),
        }
    }

    fn entry_dir(&self, slug: &str) -> PathBuf {
        self.root.join(slug)
    }

    fn index_path(&self, slug: &str) -> PathBuf {
        self.entry_dir(slug).join("index.json")
    }

    fn chapters_path(&self, slug: &str) -> PathBuf {
        self.entry_dir(slug).join("chapters.json")
    }

    pub fn load_record(&self, slug: &str) -> Result<Option<MangaRecord>> {
        match fs::metadata(self.entry_dir(slug)) {
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
            Ok(metadata) if !metadata.is_dir() => return Ok(None),
            Ok(_) => {}
        }

        let content = match fs::read_to_string(self.index_path(slug)) {
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            other => other?,
        };

        let mut record: MangaRecord = serde_json::from_str(&content)?;
        record.exists = true;
        debug!("[CACHE] record hit for '{}'", slug);
        Ok(Some(record))
    }

    /// Persist all record fields except the transient document. "Not found"
    /// records are never written; every lookup of an unknown name re-fetches.
    pub fn store_record(&self, record: &MangaRecord) -> Result<()> {
        if !record.exists {
            return Ok(());
        }

        let dir = self.entry_dir(&record.normalized_name);
        fs::create_dir_all(&dir)?;
        let file = fs::File::create(self.index_path(&record.normalized_name))?;
        serde_json::to_writer_pretty(file, record)?;
        info!("[CACHE] stored record for '{}'", record.normalized_name);
        Ok(())
    }

    pub fn load_chapters(&self, slug: &str) -> Result<Option<ChapterMap>> {
        let content = match fs::read_to_string(self.chapters_path(slug)) {
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            other => other?,
        };
        let chapters: ChapterMap = serde_json::from_str(&content)?;
        debug!(
            "[CACHE] chapter hit for '{}': {} chapters",
            slug,
            chapters.len()
        );
        Ok(Some(chapters))
    }

    pub fn store_chapters(&self, slug: &str, chapters: &ChapterMap) -> Result<()> {
        fs::create_dir_all(self.entry_dir(slug))?;
        let file = fs::File::create(self.chapters_path(slug))?;
        serde_json::to_writer_pretty(file, chapters)?;
        info!(
            "[CACHE] stored {} chapters for '{}'",
            chapters.len(),
            slug
        );
        Ok(())
    }
}
