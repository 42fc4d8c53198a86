use crate::extract::compile_selector;
use crate::ConfigError;
use scraper::{Html, Selector};
use std::fmt;

/// An element whose presence marks a page as ready
///
/// Listing pages are ready once a product card exists; detail pages once the
/// main product-info block exists.
#[derive(Debug, Clone)]
pub struct Landmark {
    css: String,
    selector: Selector,
}

impl Landmark {
    /// Landmark from an arbitrary CSS selector
    pub fn css(css: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            css: css.to_string(),
            selector: compile_selector("landmark", css)?,
        })
    }

    /// Landmark matching any element with the given class
    pub fn class(name: &str) -> Result<Self, ConfigError> {
        Self::css(&format!(".{}", name))
    }

    /// Landmark matching the element with the given id
    pub fn id(name: &str) -> Result<Self, ConfigError> {
        Self::css(&format!("#{}", name))
    }

    pub fn as_str(&self) -> &str {
        &self.css
    }

    /// Returns true if the landmark occurs in `markup`
    pub fn is_present(&self, markup: &str) -> bool {
        let document = Html::parse_document(markup);
        let found = document.select(&self.selector).next().is_some();
        found
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_landmark() {
        let landmark = Landmark::class("product-item-list").unwrap();
        assert_eq!(landmark.as_str(), ".product-item-list");
        assert!(landmark.is_present(r#"<div class="grid product-item-list"></div>"#));
        assert!(!landmark.is_present(r#"<div class="grid"></div>"#));
    }

    #[test]
    fn test_id_landmark() {
        let landmark = Landmark::id("ProductInfo-main-product-info").unwrap();
        assert!(landmark.is_present(r#"<section id="ProductInfo-main-product-info"></section>"#));
        assert!(!landmark.is_present("<section></section>"));
    }

    #[test]
    fn test_invalid_css_rejected() {
        assert!(Landmark::css("div[").is_err());
    }
}
