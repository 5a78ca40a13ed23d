pub mod rules;

#[cfg(test)]
mod tests;

pub use rules::{SiteRule, default_rules};

use crate::record::ScrapedJobRecord;
use scraper::{Html, Selector};
use url::Url;

/// Longest trailing title segment still accepted as a company name by the
/// split heuristic. Longer segments are more likely a location or job-type
/// suffix than a company.
pub const COMPANY_SPLIT_MAX_LEN: usize = 30;

/// Derives structured job-posting fields from an arbitrary career page
///
/// Extraction is tiered: site-specific selectors first, open-graph
/// metadata second, a title-split heuristic for the company third, and
/// fixed sentinel strings last. Every lookup is optional; the extractor
/// never fails, it only degrades.
#[derive(Debug, Clone)]
pub struct FieldExtractor {
    rules: Vec<SiteRule>,
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl FieldExtractor {
    /// Create an extractor with the given site rule set
    ///
    /// Rules are evaluated in order; the first host match wins and at most
    /// one rule applies per scrape.
    pub fn new(rules: Vec<SiteRule>) -> Self {
        Self { rules }
    }

    /// Extract a job record from a page's HTML and URL
    pub fn extract(&self, html: &str, url: &str) -> ScrapedJobRecord {
        let doc = Html::parse_document(html);

        let rule = self.rule_for(url);
        match rule {
            Some(rule) => {
                ::log::debug!("Site rule matched for {}: {:?}", url, rule.host_patterns)
            }
            None => ::log::debug!("No site rule matched for {}, using generic tiers", url),
        }

        // Site-specific tier
        let mut title = rule
            .map(|r| first_selector_text(&doc, &r.title_selectors))
            .unwrap_or_default();
        let mut company = rule
            .map(|r| first_selector_text(&doc, &r.company_selectors))
            .unwrap_or_default();

        // Open-graph metadata tier
        if title.is_empty() {
            title = meta_content(&doc, "og:title").unwrap_or_else(|| document_title(&doc));
        }
        if company.is_empty() {
            company = meta_content(&doc, "og:site_name").unwrap_or_default();
        }

        // Heuristic split tier (company only)
        if company.is_empty() {
            company = split_company_from_title(&title).unwrap_or_default();
        }

        ScrapedJobRecord::new(company, title, url)
    }

    /// First rule whose host matcher hits the page URL's host
    fn rule_for(&self, url: &str) -> Option<&SiteRule> {
        let parsed = Url::parse(url).ok()?;
        let host = parsed.host_str()?;
        self.rules.iter().find(|r| r.matches_host(host))
    }
}

/// First selector that yields non-empty text, after normalization
///
/// Invalid selectors are skipped rather than propagated; a bad entry in a
/// user-supplied rule set must not break extraction.
fn first_selector_text(doc: &Html, selectors: &[String]) -> String {
    for raw in selectors {
        let selector = match Selector::parse(raw) {
            Ok(s) => s,
            Err(_) => {
                ::log::warn!("Skipping invalid selector: {}", raw);
                continue;
            }
        };

        if let Some(element) = doc.select(&selector).next() {
            let text = clean(&element.text().collect::<Vec<_>>().join(" "));
            if !text.is_empty() {
                return text;
            }
        }
    }
    String::new()
}

/// Collapses embedded newlines and whitespace runs to single spaces and
/// trims, so emptiness and length checks operate on clean text
fn clean(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reads a `<meta property="..." content="...">` value
fn meta_content(doc: &Html, property: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"meta[property="{}"]"#, property)).ok()?;
    let content = doc.select(&selector).next()?.value().attr("content")?;
    let content = clean(content);
    if content.is_empty() { None } else { Some(content) }
}

/// The document's own `<title>` text
fn document_title(doc: &Html) -> String {
    let selector = Selector::parse("title").expect("static selector");
    doc.select(&selector)
        .next()
        .map(|e| clean(&e.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}

/// Takes the trailing segment of a `"<position> at <company>"` or
/// `"<position> - <company>"` title as the company name
///
/// Returns `None` when no separator is present or the candidate exceeds
/// [`COMPANY_SPLIT_MAX_LEN`].
fn split_company_from_title(title: &str) -> Option<String> {
    let candidate = title
        .rsplit_once(" at ")
        .or_else(|| title.rsplit_once(" - "))
        .map(|(_, trailing)| clean(trailing))?;

    if candidate.is_empty() || candidate.len() > COMPANY_SPLIT_MAX_LEN {
        ::log::debug!("Rejecting split-heuristic company candidate: {}", candidate);
        return None;
    }
    Some(candidate)
}
