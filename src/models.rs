use scraper::Html;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Status string the site reports for an ongoing series. A cache hit with
/// this status re-fetches the home page document so chapter listing stays
/// usable; all other statuses are trusted as final.
pub const ACTIVE_STATUS: &str = "Ativo";

/// Chapter identifier (final URL path segment) to its ordered image URLs.
pub type ChapterMap = BTreeMap<String, Vec<String>>;

/// One manga or webtoon as scraped from its home page.
///
/// All descriptive fields are absent until a successful fetch; they are
/// populated all-or-nothing. The parsed home page document is transient:
/// never persisted, never part of equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MangaRecord {
    pub exists: bool,
    pub normalized_name: String,
    pub display_name: Option<String>,
    pub rating: Option<f64>,
    pub thumbnail_url: Option<String>,
    pub vote_count: Option<i64>,
    pub chapter_count: Option<usize>,
    pub alternate_names: Vec<String>,
    pub genres: Vec<String>,
    pub author: Option<String>,
    pub artist: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub source_url: Option<String>,
    #[serde(skip)]
    pub document: Option<Html>,
}

impl MangaRecord {
    /// Terminal "not found" record: the site answered 404 or redirected.
    pub fn missing(normalized_name: String) -> Self {
        Self {
            exists: false,
            normalized_name,
            display_name: None,
            rating: None,
            thumbnail_url: None,
            vote_count: None,
            chapter_count: None,
            alternate_names: Vec::new(),
            genres: Vec::new(),
            author: None,
            artist: None,
            status: None,
            description: None,
            source_url: None,
            document: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some(ACTIVE_STATUS)
    }

    /// Chapter count, `0` before a successful fetch.
    pub fn len(&self) -> usize {
        self.chapter_count.unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Equality over every persisted field; the transient document is excluded.
impl PartialEq for MangaRecord {
    fn eq(&self, other: &Self) -> bool {
        self.exists == other.exists
            && self.normalized_name == other.normalized_name
            && self.display_name == other.display_name
            && self.rating == other.rating
            && self.thumbnail_url == other.thumbnail_url
            && self.vote_count == other.vote_count
            && self.chapter_count == other.chapter_count
            && self.alternate_names == other.alternate_names
            && self.genres == other.genres
            && self.author == other.author
            && self.artist == other.artist
            && self.status == other.status
            && self.description == other.description
            && self.source_url == other.source_url
    }
}

/// Ordering compares chapter counts only. Records without a count order
/// before any record with one.
impl PartialOrd for MangaRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.chapter_count.cmp(&other.chapter_count))
    }
}

impl std::fmt::Display for MangaRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.display_name {
            Some(name) => write!(f, "<Manga: {}>", name),
            None => write!(f, "<Manga: {}>", self.normalized_name),
        }
    }
}
