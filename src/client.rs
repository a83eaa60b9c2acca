use crate::cache::CacheStore;
use crate::chapters::ChapterLister;
use crate::config::Config;
use crate::error::Result;
use crate::http::HttpClient;
use crate::models::{ChapterMap, MangaRecord};
use crate::scrape::{normalize, RecordBuilder};
use scraper::Html;
use tracing::info;

/// Entry point tying the record builder, the cache store and the chapter
/// lister together over one configuration.
pub struct Uscrape {
    http: HttpClient,
    cache: CacheStore,
    builder: RecordBuilder,
}

impl Uscrape {
    pub fn new(config: Config) -> Self {
        let http = HttpClient::new(&config.site);
        let cache = CacheStore::new(&config.storage);
        let builder = RecordBuilder::new(http.clone(), config.site.clone());
        Self {
            http,
            cache,
            builder,
        }
    }

    /// Canonical site and `./data` cache root.
    pub fn with_defaults() -> Self {
        Self::new(Config::default())
    }

    /// Always fetch from the site; the cache is neither read nor written.
    pub fn fetch(&self, name: &str) -> Result<MangaRecord> {
        self.builder.build(name)
    }

    /// Cache-first lookup. Cached fields are trusted indefinitely; for a
    /// series the site marks active, the home page document is re-fetched so
    /// chapter listing stays usable. A fresh record is persisted when it
    /// exists; "not found" is never cached.
    pub fn lookup(&self, name: &str) -> Result<MangaRecord> {
        let slug = normalize(name);

        if let Some(mut record) = self.cache.load_record(&slug)? {
            if record.is_active() {
                if let Some(url) = record.source_url.clone() {
                    info!("[UNION CACHE] Refreshing home document for active '{}'", slug);
                    let body = self.http.get_no_redirect(&url)?.text()?;
                    record.document = Some(Html::parse_document(&body));
                }
            }
            return Ok(record);
        }

        let record = self.builder.build(name)?;
        self.cache.store_record(&record)?;
        Ok(record)
    }

    /// Chapter map for an existing record, cache-first.
    pub fn chapters(&self, record: &mut MangaRecord) -> Result<ChapterMap> {
        ChapterLister::new(&self.http, &self.cache).list(record)
    }
}
