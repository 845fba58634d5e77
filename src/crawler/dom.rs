//! Narrow DOM query capability used by the page handlers
//!
//! Handlers only need "select elements, read their text and attributes", so
//! they are written against the [`Dom`] trait and can be exercised with
//! hand-built fixtures. [`HtmlDom`] is the `scraper`-backed implementation.

use crate::CensusError;
use scraper::{Html, Selector};

/// An element returned by a [`Dom`] query, detached from its document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Concatenated text of the element and its descendants, untrimmed
    pub text: String,

    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Returns the value of attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns whether the whitespace-separated `class` attribute contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

/// CSS-selector query over a parsed page
pub trait Dom {
    /// Returns every element matching `selector`, in document order
    fn query(&self, selector: &str) -> Result<Vec<Element>, CensusError>;
}

/// A parsed HTML document
///
/// `scraper::Html` is not `Send`, so an `HtmlDom` must be created and dropped
/// without crossing an `.await`.
pub struct HtmlDom {
    document: Html,
}

impl HtmlDom {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }
}

impl Dom for HtmlDom {
    fn query(&self, selector: &str) -> Result<Vec<Element>, CensusError> {
        let parsed = Selector::parse(selector).map_err(|e| CensusError::Selector {
            selector: selector.to_string(),
            message: format!("{:?}", e),
        })?;

        Ok(self
            .document
            .select(&parsed)
            .map(|element| Element {
                text: element.text().collect::<String>(),
                attributes: element
                    .value()
                    .attrs()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
            })
            .collect())
    }
}
