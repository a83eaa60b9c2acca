//! Selector table for unionleitor.top markup.
//!
//! Every field the scraper reads is named here as a [`Rule`]: a CSS selector,
//! optionally anchored inside the Nth repeated detail block of the manga home
//! page. Markup changes on the site touch this module and nothing else.

use crate::error::{Result, UscrapeError};
use scraper::{ElementRef, Html, Selector};

/// Repeated description block on the manga home page. Fields live at fixed
/// positions within the sequence of these blocks.
pub const DETAIL_BLOCK: &str = "div.col-md-8.col-xs-12";

/// One block per chapter in the home page listing; the count of these is the
/// chapter count.
pub const CHAPTER_BLOCK: &str = "div.col-xs-6.col-md-6";

/// Anchor inside a chapter block carrying the chapter page URL.
pub const CHAPTER_LINK: &str = "div.col-xs-6.col-md-6 > a";

/// Page images on a chapter page. The first two matches are site chrome, not
/// chapter content.
pub const PAGE_IMAGE: &str = "div.col-sm-12.text-center img";

pub const TITLE: Rule = Rule::doc("div.col-md-12 > h2");
pub const THUMBNAIL: Rule = Rule::doc("img.img-thumbnail");
pub const RATING: Rule = Rule::detail(1, "h2");
pub const VOTES: Rule = Rule::detail(1, "h2 > small > strong");
pub const ALT_NAMES: Rule = Rule::detail(2, "h4");
pub const GENRES: Rule = Rule::detail(3, "h4 > a");
pub const AUTHOR: Rule = Rule::detail(4, "h4");
pub const ARTIST: Rule = Rule::detail(5, "h4");
pub const STATUS: Rule = Rule::detail(6, "h4 > span");
pub const DESCRIPTION: Rule = Rule::detail(8, "div > div");

/// A named extraction rule: where in the document a field lives.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// 1-based position among the [`DETAIL_BLOCK`] matches, or `None` for a
    /// document-wide selector.
    block: Option<usize>,
    css: &'static str,
}

impl Rule {
    const fn doc(css: &'static str) -> Self {
        Self { block: None, css }
    }

    const fn detail(block: usize, css: &'static str) -> Self {
        Self {
            block: Some(block),
            css,
        }
    }

    /// First matching element, or an extraction error naming `field`.
    pub fn element<'a>(&self, document: &'a Html, field: &'static str) -> Result<ElementRef<'a>> {
        self.elements(document, field)?
            .into_iter()
            .next()
            .ok_or(UscrapeError::extraction(field))
    }

    /// All matching elements, in document order. Errors only when the rule is
    /// block-anchored and the block itself is missing.
    pub fn elements<'a>(
        &self,
        document: &'a Html,
        field: &'static str,
    ) -> Result<Vec<ElementRef<'a>>> {
        let selector = Selector::parse(self.css).unwrap();
        match self.block {
            None => Ok(document.select(&selector).collect()),
            Some(position) => {
                let blocks = Selector::parse(DETAIL_BLOCK).unwrap();
                let block = document
                    .select(&blocks)
                    .nth(position - 1)
                    .ok_or(UscrapeError::extraction(field))?;
                Ok(block.select(&selector).collect())
            }
        }
    }
}

/// Text of the element's direct child text nodes only, excluding text inside
/// nested elements. Matches what the site's labels require: the rating `h2`
/// also contains the vote count in a nested `small`.
pub fn own_text(element: ElementRef<'_>) -> String {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &*text.text)
        .collect()
}

/// Attribute value, or an extraction error naming `field`.
pub fn attr(element: ElementRef<'_>, name: &str, field: &'static str) -> Result<String> {
    element
        .value()
        .attr(name)
        .map(str::to_string)
        .ok_or(UscrapeError::extraction(field))
}

/// Count of matches for a document-wide selector.
pub fn count(document: &Html, css: &str) -> usize {
    let selector = Selector::parse(css).unwrap();
    document.select(&selector).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_text_skips_nested_elements() {
        let document = Html::parse_fragment("<h2># 4.5 <small><strong>321</strong></small></h2>");
        let selector = Selector::parse("h2").unwrap();
        let element = document.select(&selector).next().unwrap();
        assert_eq!(own_text(element).trim_start_matches(&['#', ' '][..]), "4.5 ");
    }

    #[test]
    fn detail_rule_indexes_blocks_positionally() {
        let document = Html::parse_document(
            r#"<div class="col-md-8 col-xs-12"><h4>first</h4></div>
               <div class="col-md-8 col-xs-12"><h4>second</h4></div>"#,
        );
        let rule = Rule::detail(2, "h4");
        let element = rule.element(&document, "alternate_names").unwrap();
        assert_eq!(own_text(element), "second");
    }

    #[test]
    fn missing_block_is_an_extraction_error() {
        let document = Html::parse_document("<p>nothing here</p>");
        let err = DESCRIPTION.element(&document, "description").unwrap_err();
        assert!(matches!(
            err,
            UscrapeError::Extraction {
                field: "description"
            }
        ));
    }
}
