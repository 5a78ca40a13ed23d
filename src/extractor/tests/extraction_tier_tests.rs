use crate::extractor::{FieldExtractor, SiteRule};
use crate::record::{UNKNOWN_COMPANY, UNKNOWN_POSITION};

/// A synthetic single-site rule set for tier tests
fn test_rules() -> Vec<SiteRule> {
    vec![SiteRule {
        host_patterns: vec!["jobs.test".to_string()],
        title_selectors: vec![
            ".posting-title".to_string(),
            ".posting-title-alt".to_string(),
            "h1".to_string(),
        ],
        company_selectors: vec![".posting-company".to_string()],
    }]
}

#[cfg(test)]
mod tier_priority_tests {
    use super::*;

    #[test]
    fn test_unknown_page_yields_sentinels() {
        let extractor = FieldExtractor::new(test_rules());
        let html = "<html><body><div>Nothing recognizable here</div></body></html>";

        let record = extractor.extract(html, "https://unrelated.example.com/page");

        assert_eq!(record.company, UNKNOWN_COMPANY);
        assert_eq!(record.position, UNKNOWN_POSITION);
        assert_eq!(record.offer_link, "https://unrelated.example.com/page");
        assert_eq!(record.company_link, "https://unrelated.example.com/page");
    }

    #[test]
    fn test_site_tier_beats_metadata_tier() {
        let extractor = FieldExtractor::new(test_rules());
        let html = r#"<html><head>
            <meta property="og:title" content="Metadata Title" />
            <meta property="og:site_name" content="Metadata Site" />
            </head><body>
            <div class="posting-title">Selector Title</div>
            <div class="posting-company">Selector Company</div>
            </body></html>"#;

        let record = extractor.extract(html, "https://jobs.test/offer/1");

        assert_eq!(record.position, "Selector Title");
        assert_eq!(record.company, "Selector Company");
    }

    #[test]
    fn test_selector_order_most_specific_first() {
        let extractor = FieldExtractor::new(test_rules());
        let html = r#"<html><body>
            <h1>Generic Heading</h1>
            <div class="posting-title-alt">Alternate Layout Title</div>
            </body></html>"#;

        let record = extractor.extract(html, "https://jobs.test/offer/2");

        assert_eq!(record.position, "Alternate Layout Title");
    }

    #[test]
    fn test_metadata_tier_fills_unmatched_fields() {
        let extractor = FieldExtractor::new(test_rules());
        let html = r#"<html><head>
            <meta property="og:title" content="Backend Developer" />
            <meta property="og:site_name" content="Acme Careers" />
            </head><body></body></html>"#;

        let record = extractor.extract(html, "https://other-board.example.com/jobs/7");

        assert_eq!(record.position, "Backend Developer");
        assert_eq!(record.company, "Acme Careers");
    }

    #[test]
    fn test_document_title_is_last_title_fallback() {
        let extractor = FieldExtractor::new(test_rules());
        let html = "<html><head><title>Data Engineer</title></head><body></body></html>";

        let record = extractor.extract(html, "https://other-board.example.com/jobs/8");

        assert_eq!(record.position, "Data Engineer");
    }

    #[test]
    fn test_whitespace_is_normalized_before_fallbacks() {
        let extractor = FieldExtractor::new(test_rules());
        let html = "<html><body><h1>  Senior\n   Engineer \t</h1></body></html>";

        let record = extractor.extract(html, "https://jobs.test/offer/3");

        assert_eq!(record.position, "Senior Engineer");
    }

    #[test]
    fn test_empty_selector_hits_fall_through() {
        // A matching element with only whitespace must not shadow later tiers
        let extractor = FieldExtractor::new(test_rules());
        let html = r#"<html><head>
            <meta property="og:title" content="Real Title" />
            </head><body><div class="posting-title">   </div></body></html>"#;

        let record = extractor.extract(html, "https://jobs.test/offer/4");

        assert_eq!(record.position, "Real Title");
    }

    #[test]
    fn test_invalid_selector_is_skipped() {
        let rules = vec![SiteRule {
            host_patterns: vec!["jobs.test".to_string()],
            title_selectors: vec!["][not-a-selector".to_string(), "h1".to_string()],
            company_selectors: vec![],
        }];
        let extractor = FieldExtractor::new(rules);
        let html = "<html><body><h1>Still Extracted</h1></body></html>";

        let record = extractor.extract(html, "https://jobs.test/offer/5");

        assert_eq!(record.position, "Still Extracted");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = FieldExtractor::new(test_rules());
        let html = r#"<html><body>
            <div class="posting-title">Platform Engineer</div>
            <div class="posting-company">Acme Corp</div>
            </body></html>"#;

        let first = extractor.extract(html, "https://jobs.test/offer/6");
        let second = extractor.extract(html, "https://jobs.test/offer/6");

        assert_eq!(first, second);
    }

    #[test]
    fn test_unparseable_url_still_produces_a_record() {
        let extractor = FieldExtractor::new(test_rules());
        let html = "<html><head><title>Some Role</title></head><body></body></html>";

        let record = extractor.extract(html, "not a url");

        assert_eq!(record.position, "Some Role");
        assert_eq!(record.offer_link, "not a url");
    }
}
