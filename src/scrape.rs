use crate::config::SiteConfig;
use crate::error::{Result, UscrapeError};
use crate::http::HttpClient;
use crate::models::MangaRecord;
use crate::selectors::{self, own_text};
use reqwest::StatusCode;
use scraper::Html;
use tracing::{debug, info};

/// Lowercase, spaces to dashes. The result is both the cache key and the URL
/// path segment.
pub fn normalize(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Builds a [`MangaRecord`] from the site by name.
pub struct RecordBuilder {
    http: HttpClient,
    site: SiteConfig,
}

impl RecordBuilder {
    pub fn new(http: HttpClient, site: SiteConfig) -> Self {
        Self { http, site }
    }

    /// Fetch and parse the manga home page.
    ///
    /// A 404, or a 302 to the site's front page, means the name is unknown:
    /// that returns a record with `exists = false` and is not an error. Any
    /// other response is parsed in full; a missing field fails hard.
    pub fn build(&self, name: &str) -> Result<MangaRecord> {
        let slug = normalize(name);
        let url = self.site.manga_url(&slug);
        info!("[UNION PARSER] Fetching manga page: {}", url);

        let response = self.http.get_no_redirect(&url)?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::FOUND {
            info!("[UNION PARSER] '{}' not found (status {})", slug, status);
            return Ok(MangaRecord::missing(slug));
        }

        let body = response.text()?;
        debug!("[UNION PARSER] HTML length: {}", body.len());
        let document = Html::parse_document(&body);
        let record = extract_record(document, slug, url)?;
        info!(
            "[UNION PARSER] Parsed '{}': {} chapters",
            record.normalized_name,
            record.len()
        );
        Ok(record)
    }
}

/// Extract every record field from a parsed home page. Split out from the
/// fetch so parsing is testable against fixtures.
pub fn extract_record(document: Html, slug: String, url: String) -> Result<MangaRecord> {
    let display_name = own_text(selectors::TITLE.element(&document, "display_name")?);
    debug!("[UNION PARSER] display_name={}", display_name);

    let thumbnail_url = selectors::attr(
        selectors::THUMBNAIL.element(&document, "thumbnail_url")?,
        "src",
        "thumbnail_url",
    )?;
    debug!("[UNION PARSER] thumbnail_url={}", thumbnail_url);

    let chapter_count = selectors::count(&document, selectors::CHAPTER_BLOCK);
    debug!("[UNION PARSER] chapter_count={}", chapter_count);

    let rating = own_text(selectors::RATING.element(&document, "rating")?)
        .trim_matches(&['#', ' '][..])
        .parse::<f64>()
        .map_err(|_| UscrapeError::extraction("rating"))?;
    debug!("[UNION PARSER] rating={}", rating);

    let vote_count = own_text(selectors::VOTES.element(&document, "vote_count")?)
        .trim()
        .parse::<i64>()
        .map_err(|_| UscrapeError::extraction("vote_count"))?;
    debug!("[UNION PARSER] vote_count={}", vote_count);

    let alternate_names: Vec<String> =
        own_text(selectors::ALT_NAMES.element(&document, "alternate_names")?)
            .trim()
            .split(", ")
            .map(str::to_string)
            .collect();
    debug!("[UNION PARSER] alternate_names={:?}", alternate_names);

    let genres: Vec<String> = selectors::GENRES
        .elements(&document, "genres")?
        .into_iter()
        .map(|element| element.text().collect::<String>())
        .collect();
    debug!("[UNION PARSER] genres={:?}", genres);

    let author = own_text(selectors::AUTHOR.element(&document, "author")?)
        .trim()
        .to_string();
    let artist = own_text(selectors::ARTIST.element(&document, "artist")?)
        .trim()
        .to_string();
    let status = own_text(selectors::STATUS.element(&document, "status")?);
    debug!(
        "[UNION PARSER] author={} artist={} status={}",
        author, artist, status
    );

    // The description sits in the innermost of the block's nested divs.
    let description = selectors::DESCRIPTION
        .elements(&document, "description")?
        .into_iter()
        .last()
        .map(own_text)
        .ok_or(UscrapeError::extraction("description"))?
        .trim()
        .to_string();

    Ok(MangaRecord {
        exists: true,
        normalized_name: slug,
        display_name: Some(display_name),
        rating: Some(rating),
        thumbnail_url: Some(thumbnail_url),
        vote_count: Some(vote_count),
        chapter_count: Some(chapter_count),
        alternate_names,
        genres,
        author: Some(author),
        artist: Some(artist),
        status: Some(status),
        description: Some(description),
        source_url: Some(url),
        document: Some(document),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// Manga home page in the site's markup, with `chapters` chapter blocks.
    pub fn home_page(chapters: usize) -> String {
        let chapter_blocks: String = (1..=chapters)
            .map(|n| {
                format!(
                    r#"<div class="col-xs-6 col-md-6">
                         <a href="https://unionleitor.top/leitor/one-piece/{:02}">Cap. {:02}</a>
                       </div>"#,
                    n, n
                )
            })
            .collect();

        format!(
            r#"<html><body>
            <div class="col-md-12"><h2>One Piece</h2></div>
            <img class="img-thumbnail" src="https://unionleitor.top/thumbs/one-piece.jpg">
            <div class="col-md-8 col-xs-12">
              <h2># 4.53 <small><strong>321</strong></small></h2>
            </div>
            <div class="col-md-8 col-xs-12"><h4><label>Alt:</label> Wan Pisu, OP </h4></div>
            <div class="col-md-8 col-xs-12"><h4><a>Action</a><a>Adventure</a></h4></div>
            <div class="col-md-8 col-xs-12"><h4><label>Autor:</label> Eiichiro Oda </h4></div>
            <div class="col-md-8 col-xs-12"><h4><label>Artista:</label> Eiichiro Oda </h4></div>
            <div class="col-md-8 col-xs-12"><h4><span>Ativo</span></h4></div>
            <div class="col-md-8 col-xs-12"><h4>extra block</h4></div>
            <div class="col-md-8 col-xs-12"><div><div> A pirate story. </div></div></div>
            {}
            </body></html>"#,
            chapter_blocks
        )
    }

    /// Chapter page with `images` image nodes; the first two are site chrome.
    pub fn chapter_page(images: usize) -> String {
        let image_nodes: String = (1..=images)
            .map(|n| {
                format!(
                    r#"<img src="https://unionleitor.top/pages/one-piece/01/{:02}.jpg">"#,
                    n
                )
            })
            .collect();
        format!(
            r#"<html><body><div class="col-sm-12 text-center">{}</div></body></html>"#,
            image_nodes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_names() {
        assert_eq!(normalize("One Piece"), "one-piece");
        assert_eq!(normalize("NOZOKI ANA"), "nozoki-ana");
        assert_eq!(normalize("berserk"), "berserk");
    }

    #[test]
    fn extracts_every_field_from_the_home_page() {
        let document = Html::parse_document(&fixtures::home_page(12));
        let record = extract_record(
            document,
            "one-piece".to_string(),
            "https://unionleitor.top/pagina-manga/one-piece".to_string(),
        )
        .unwrap();

        assert!(record.exists);
        assert_eq!(record.display_name.as_deref(), Some("One Piece"));
        assert_eq!(
            record.thumbnail_url.as_deref(),
            Some("https://unionleitor.top/thumbs/one-piece.jpg")
        );
        assert_eq!(record.rating, Some(4.53));
        assert_eq!(record.vote_count, Some(321));
        assert_eq!(record.alternate_names, vec!["Wan Pisu", "OP"]);
        assert_eq!(record.genres, vec!["Action", "Adventure"]);
        assert_eq!(record.author.as_deref(), Some("Eiichiro Oda"));
        assert_eq!(record.artist.as_deref(), Some("Eiichiro Oda"));
        assert_eq!(record.status.as_deref(), Some("Ativo"));
        assert_eq!(record.description.as_deref(), Some("A pirate story."));
        assert!(record.document.is_some());
    }

    #[test]
    fn chapter_count_is_the_number_of_chapter_blocks() {
        let document = Html::parse_document(&fixtures::home_page(12));
        let record = extract_record(document, "x".to_string(), "u".to_string()).unwrap();
        assert_eq!(record.chapter_count, Some(12));
    }

    #[test]
    fn missing_field_fails_hard_and_names_the_field() {
        // Home page without the thumbnail image.
        let html = fixtures::home_page(1).replace("img-thumbnail", "img-other");
        let document = Html::parse_document(&html);
        let err = extract_record(document, "x".to_string(), "u".to_string()).unwrap_err();
        assert!(matches!(
            err,
            UscrapeError::Extraction {
                field: "thumbnail_url"
            }
        ));
    }

    #[test]
    fn unparseable_rating_is_an_extraction_error() {
        let html = fixtures::home_page(1).replace("# 4.53", "# n/a");
        let document = Html::parse_document(&html);
        let err = extract_record(document, "x".to_string(), "u".to_string()).unwrap_err();
        assert!(matches!(err, UscrapeError::Extraction { field: "rating" }));
    }
}
