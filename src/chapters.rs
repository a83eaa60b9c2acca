use crate::cache::CacheStore;
use crate::error::{Result, UscrapeError};
use crate::http::HttpClient;
use crate::models::{ChapterMap, MangaRecord};
use crate::selectors;
use scraper::{Html, Selector};
use tracing::{debug, info};
use url::Url;

/// Lists a record's chapters as a map from chapter identifier to its ordered
/// image URLs, cache-first.
pub struct ChapterLister<'a> {
    http: &'a HttpClient,
    cache: &'a CacheStore,
}

impl<'a> ChapterLister<'a> {
    pub fn new(http: &'a HttpClient, cache: &'a CacheStore) -> Self {
        Self { http, cache }
    }

    /// Cached `chapters.json` is returned verbatim, with no staleness check.
    /// Otherwise every chapter page is fetched sequentially, the map is
    /// persisted, and the record's home document is (re)populated as a side
    /// effect.
    pub fn list(&self, record: &mut MangaRecord) -> Result<ChapterMap> {
        if !record.exists {
            return Err(UscrapeError::manga_not_found(record.normalized_name.clone()));
        }

        if let Some(cached) = self.cache.load_chapters(&record.normalized_name)? {
            return Ok(cached);
        }

        // An existing record always carries its home URL.
        let url = record
            .source_url
            .clone()
            .ok_or_else(|| UscrapeError::manga_not_found(record.normalized_name.clone()))?;

        let home = match record.document.take() {
            Some(document) => document,
            None => {
                info!("[UNION CHAPTERS] Fetching home page: {}", url);
                let body = self.http.get_text(&url)?;
                Html::parse_document(&body)
            }
        };

        let urls = chapter_urls(&home);
        record.document = Some(home);
        info!(
            "[UNION CHAPTERS] Found {} chapter pages for '{}'",
            urls.len(),
            record.normalized_name
        );

        let mut chapters = ChapterMap::new();
        for chapter_url in urls {
            let id = chapter_id(&chapter_url)?;
            let body = self.http.get_text(&chapter_url)?;
            let page = Html::parse_document(&body);
            let images = page_images(&page);
            debug!("[UNION CHAPTERS] Chapter '{}': {} pages", id, images.len());
            chapters.insert(id, images);
        }

        self.cache
            .store_chapters(&record.normalized_name, &chapters)?;
        Ok(chapters)
    }
}

/// Chapter page URLs from the home document, sorted lexicographically by the
/// full URL string.
fn chapter_urls(home: &Html) -> Vec<String> {
    let selector = Selector::parse(selectors::CHAPTER_LINK).unwrap();
    let mut urls: Vec<String> = home
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(str::to_string)
        .collect();
    urls.sort();
    urls
}

/// Chapter identifier: the final path segment of the chapter URL.
fn chapter_id(chapter_url: &str) -> Result<String> {
    let parsed = Url::parse(chapter_url)?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    Ok(segment.to_string())
}

/// Image URLs on a chapter page, dropping the first two (site chrome, not
/// chapter content).
fn page_images(page: &Html) -> Vec<String> {
    let selector = Selector::parse(selectors::PAGE_IMAGE).unwrap();
    page.select(&selector)
        .filter_map(|image| image.value().attr("src"))
        .skip(2)
        .map(str::to_string)
        .collect()
}
