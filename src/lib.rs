//! Scraper for UnionMangas (unionleitor.top) manga and webtoon pages.
//!
//! One blocking HTTP GET per page, a fixed-shape parse driven by the selector
//! table in [`selectors`], and an optional flat-file JSON cache keyed by the
//! normalized name. [`Uscrape::fetch`] always hits the network;
//! [`Uscrape::lookup`] goes through the cache.
//!
//! ```no_run
//! use uscrape::Uscrape;
//!
//! let client = Uscrape::with_defaults();
//! let mut record = client.lookup("One Piece")?;
//! if record.exists {
//!     let chapters = client.chapters(&mut record)?;
//!     println!("{}: {} chapters", record, chapters.len());
//! }
//! # Ok::<(), uscrape::UscrapeError>(())
//! ```

pub mod cache;
pub mod chapters;
mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod scrape;
pub mod selectors;

pub use client::Uscrape;
pub use config::{Config, SiteConfig, StorageConfig};
pub use error::{Result, UscrapeError};
pub use models::{ChapterMap, MangaRecord, ACTIVE_STATUS};
pub use scrape::normalize;
