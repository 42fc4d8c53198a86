//! Listing page extraction
//!
//! Every node matching the item selector is one product card. A card that is
//! missing its name, link or image is skipped on its own; the rest of the page
//! is still extracted.

use crate::config::{Config, ListingSelectors};
use crate::extract::{compile_selector, normalized_text};
use crate::model::ItemSummary;
use crate::url::{absolutize_image, absolutize_link};
use crate::{ConfigError, UrlError};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Why a single product card was left out of the listing
#[derive(Debug)]
pub enum SkipReason {
    MissingName,
    MissingLink,
    MissingImage,
    BadLink(UrlError),
    BadImage(UrlError),
}

/// Result of extracting one listing page
#[derive(Debug, Default)]
pub struct ListingPage {
    /// Summaries in page order
    pub items: Vec<ItemSummary>,

    /// Number of cards that were found but skipped
    pub skipped: usize,
}

impl ListingPage {
    /// An empty page means the catalog is exhausted
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parses listing pages into [`ItemSummary`] values
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    item: Selector,
    name: Selector,
    link: Selector,
    image: Selector,
    origin: Url,
}

impl ListingExtractor {
    /// Compiles the listing selectors
    ///
    /// # Arguments
    ///
    /// * `selectors` - CSS selectors for the card and its parts
    /// * `origin` - Site root that relative links are resolved against
    pub fn new(selectors: &ListingSelectors, origin: Url) -> Result<Self, ConfigError> {
        Ok(Self {
            item: compile_selector("listing.item", &selectors.item)?,
            name: compile_selector("listing.name", &selectors.name)?,
            link: compile_selector("listing.link", &selectors.link)?,
            image: compile_selector("listing.image", &selectors.image)?,
            origin,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.selectors.listing, config.origin()?)
    }

    /// Extracts the item summaries of one listing page
    ///
    /// Returns an empty vector (not an error) when the page holds no cards.
    pub fn extract(&self, markup: &str) -> Vec<ItemSummary> {
        self.extract_page(markup).items
    }

    /// Like [`extract`](Self::extract), but also counts skipped cards
    pub fn extract_page(&self, markup: &str) -> ListingPage {
        let document = Html::parse_document(markup);
        let mut page = ListingPage::default();

        for (position, card) in document.select(&self.item).enumerate() {
            match self.summarize(card) {
                Ok(summary) => page.items.push(summary),
                Err(reason) => {
                    tracing::debug!("Skipping product card #{}: {:?}", position + 1, reason);
                    page.skipped += 1;
                }
            }
        }

        page
    }

    fn summarize(&self, card: ElementRef<'_>) -> Result<ItemSummary, SkipReason> {
        let name = card
            .select(&self.name)
            .next()
            .map(normalized_text)
            .ok_or(SkipReason::MissingName)?;

        let href = card
            .select(&self.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .ok_or(SkipReason::MissingLink)?;
        let detail_url = absolutize_link(href, &self.origin).map_err(SkipReason::BadLink)?;

        let src = card
            .select(&self.image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .ok_or(SkipReason::MissingImage)?;
        let image_url = absolutize_image(src, &self.origin).map_err(SkipReason::BadImage)?;

        Ok(ItemSummary {
            name,
            detail_url,
            image_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> ListingExtractor {
        ListingExtractor::new(
            &ListingSelectors::default(),
            Url::parse("https://shop.example.com/").unwrap(),
        )
        .unwrap()
    }

    fn card(name: Option<&str>, href: Option<&str>, src: Option<&str>) -> String {
        let mut html = String::from(r#"<div class="product-item-list">"#);
        if let Some(href) = href {
            html.push_str(&format!(r#"<a class="product-card" href="{}">"#, href));
        }
        if let Some(src) = src {
            html.push_str(&format!(r#"<img class="defaultImage" src="{}">"#, src));
        }
        if let Some(name) = name {
            html.push_str(&format!(r#"<div class="product-card__name"> {} </div>"#, name));
        }
        if href.is_some() {
            html.push_str("</a>");
        }
        html.push_str("</div>");
        html
    }

    fn page(cards: &[String]) -> String {
        format!(
            "<html><body><div class=\"grid\">{}</div></body></html>",
            cards.concat()
        )
    }

    #[test]
    fn test_extracts_every_well_formed_card() {
        let markup = page(&[
            card(Some("Moon Ring"), Some("/products/moon"), Some("//cdn.example.com/moon.jpg")),
            card(Some("Sun Necklace"), Some("/products/sun"), Some("//cdn.example.com/sun.jpg")),
            card(
                Some("Star Charm"),
                Some("https://shop.example.com/products/star"),
                Some("https://cdn.example.com/star.jpg"),
            ),
        ]);

        let items = extractor().extract(&markup);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].name, "Moon Ring");
        assert_eq!(
            items[0].detail_url.as_str(),
            "https://shop.example.com/products/moon"
        );
        assert_eq!(items[0].image_url.as_str(), "https://cdn.example.com/moon.jpg");
        assert_eq!(items[2].name, "Star Charm");
        for item in &items {
            assert!(item.detail_url.scheme().starts_with("http"));
            assert!(item.image_url.scheme().starts_with("http"));
        }
    }

    #[test]
    fn test_card_missing_image_is_skipped_alone() {
        let markup = page(&[
            card(Some("A"), Some("/products/a"), Some("//cdn.example.com/a.jpg")),
            card(Some("B"), Some("/products/b"), None),
            card(Some("C"), Some("/products/c"), Some("//cdn.example.com/c.jpg")),
        ]);

        let page = extractor().extract_page(&markup);

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.skipped, 1);
        assert_eq!(page.items[0].name, "A");
        assert_eq!(page.items[1].name, "C");
        assert_eq!(
            page.items[1].detail_url.as_str(),
            "https://shop.example.com/products/c"
        );
    }

    #[test]
    fn test_card_missing_name_or_link_is_skipped() {
        let markup = page(&[
            card(None, Some("/products/a"), Some("//cdn.example.com/a.jpg")),
            card(Some("B"), None, Some("//cdn.example.com/b.jpg")),
            card(Some("C"), Some("/products/c"), Some("//cdn.example.com/c.jpg")),
        ]);

        let page = extractor().extract_page(&markup);

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.skipped, 2);
        assert_eq!(page.items[0].name, "C");
    }

    #[test]
    fn test_link_without_href_is_skipped() {
        let markup = page(&[
            r#"<div class="product-item-list"><a class="product-card"><img class="defaultImage" src="/a.jpg"><div class="product-card__name">A</div></a></div>"#.to_string(),
        ]);

        let page = extractor().extract_page(&markup);
        assert!(page.is_empty());
        assert_eq!(page.skipped, 1);
    }

    #[test]
    fn test_no_cards_is_empty_not_error() {
        let markup = "<html><body><p>No products found</p></body></html>";
        let page = extractor().extract_page(markup);
        assert!(page.is_empty());
        assert_eq!(page.skipped, 0);
    }

    #[test]
    fn test_name_text_is_trimmed() {
        let markup = page(&[card(
            Some("\n   Heart Locket\n  "),
            Some("/products/heart"),
            Some("/img/heart.jpg"),
        )]);

        let items = extractor().extract(&markup);
        assert_eq!(items[0].name, "Heart Locket");
        assert_eq!(items[0].image_url.as_str(), "https://shop.example.com/img/heart.jpg");
    }
}
