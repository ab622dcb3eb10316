use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("invalid selector {selector:?}: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Parsed, queryable HTML document.
///
/// Thin facade over `scraper`: lookups take CSS selectors and return trimmed
/// text or attribute values of the first match.
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Trimmed text of the first matching element, or an empty string.
    pub fn text(&self, selector: &str) -> Result<String, DomError> {
        let selector = compile(selector)?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .map(|el| element_text(&el))
            .unwrap_or_default())
    }

    /// Trimmed attribute value of the first matching element.
    pub fn attr(&self, selector: &str, name: &str) -> Result<Option<String>, DomError> {
        let selector = compile(selector)?;
        Ok(self
            .html
            .select(&selector)
            .next()
            .and_then(|el| element_attr(&el, name)))
    }

    /// Every matching element in document order.
    pub fn select_all(&self, selector: &str) -> Result<Vec<ElementRef<'_>>, DomError> {
        let selector = compile(selector)?;
        Ok(self.html.select(&selector).collect())
    }
}

pub fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn element_attr(element: &ElementRef<'_>, name: &str) -> Option<String> {
    element.value().attr(name).map(|v| v.trim().to_string())
}

fn compile(selector: &str) -> Result<Selector, DomError> {
    Selector::parse(selector).map_err(|err| DomError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{err:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_and_attr_are_trimmed() {
        let doc = HtmlDocument::parse(
            r#"<html><head><title>  Hello  </title><meta name="a" content="  b "></head></html>"#,
        );
        assert_eq!(doc.text("title").unwrap(), "Hello");
        assert_eq!(
            doc.attr(r#"meta[name="a"]"#, "content").unwrap().as_deref(),
            Some("b")
        );
    }

    #[test]
    fn missing_elements_yield_empty_values() {
        let doc = HtmlDocument::parse("<html></html>");
        assert_eq!(doc.text("title").unwrap(), "");
        assert_eq!(doc.attr("link", "href").unwrap(), None);
        assert!(doc.select_all("meta").unwrap().is_empty());
    }

    #[test]
    fn invalid_selector_is_an_error() {
        let doc = HtmlDocument::parse("<p>x</p>");
        assert!(matches!(
            doc.text("p[["),
            Err(DomError::InvalidSelector { .. })
        ));
    }
}
