//! Status page scraping
//!
//! The aggregator's wording is outside our control, so everything that
//! depends on it lives here.

use scraper::{ElementRef, Html, Selector};

use crate::domain::entities::Verdict;
use crate::infrastructure::config::PageCheckConfig;

/// Element holding the verdict on the aggregator page
const CONTENT_SELECTOR: &str = "div#domain-main-content";

/// Elements whose text is never rendered
const HIDDEN_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// Decides up/down from the rendered text of a status page
pub trait VerdictMatcher: Send + Sync {
    fn verdict(&self, text: &str) -> Option<Verdict>;
}

/// Substring markers. Down markers are checked before up markers.
#[derive(Debug, Clone)]
pub struct StatusMarkers {
    down: Vec<String>,
    up: Vec<String>,
}

impl StatusMarkers {
    pub fn new(down: Vec<String>, up: Vec<String>) -> Self {
        Self { down, up }
    }

    pub fn from_config(config: &PageCheckConfig) -> Self {
        Self::new(config.down_markers.clone(), config.up_markers.clone())
    }
}

impl Default for StatusMarkers {
    fn default() -> Self {
        Self::from_config(&PageCheckConfig::default())
    }
}

impl VerdictMatcher for StatusMarkers {
    fn verdict(&self, text: &str) -> Option<Verdict> {
        if self.down.iter().any(|m| text.contains(m.as_str())) {
            return Some(Verdict::Down);
        }
        if self.up.iter().any(|m| text.contains(m.as_str())) {
            return Some(Verdict::Up);
        }
        None
    }
}

/// Visible text of the verdict element, or of the page body when the
/// element is missing
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);

    for selector in [CONTENT_SELECTOR, "body"] {
        if let Ok(selector) = Selector::parse(selector) {
            if let Some(element) = document.select(&selector).next() {
                return visible_text(element);
            }
        }
    }

    String::new()
}

fn visible_text(element: ElementRef) -> String {
    element
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let parent = node.parent()?.value().as_element()?;
            (!HIDDEN_ELEMENTS.contains(&parent.name())).then_some(&**text)
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_text_prefers_content_div() {
        let html = r#"<html><body><p>is up</p><div id="domain-main-content">
            <p>It's not just you! example.com looks down from here.</p></div></body></html>"#;
        let text = page_text(html);
        assert!(text.starts_with("It's not just you!"));
        assert!(!text.contains("is up"));
    }

    #[test]
    fn test_page_text_falls_back_to_body() {
        let html = "<html><body><h1>example.com</h1><span>is up.</span></body></html>";
        assert!(page_text(html).contains("is up"));
    }

    #[test]
    fn test_page_text_ignores_head_and_scripts() {
        let html = r#"<html><head><title>Is it up?</title>
            <script>var hint = "is up";</script><style>.x { content: "not just you"; }</style></head>
            <body><script>track("is up")</script><h1>Check a site</h1></body></html>"#;
        let text = page_text(html);
        assert_eq!(text, "Check a site");
        assert_eq!(StatusMarkers::default().verdict(&text), None);
    }

    #[test]
    fn test_markers() {
        let markers = StatusMarkers::default();
        assert_eq!(markers.verdict("It's not just you! x is down"), Some(Verdict::Down));
        assert_eq!(markers.verdict("It's just you. x is up."), Some(Verdict::Up));
        assert_eq!(markers.verdict("Huh?"), None);
    }

    #[test]
    fn test_custom_markers() {
        let markers = StatusMarkers::new(vec!["offline".to_string()], vec!["online".to_string()]);
        assert_eq!(markers.verdict("site is online"), Some(Verdict::Up));
        assert_eq!(markers.verdict("It's not just you"), None);
    }
}
