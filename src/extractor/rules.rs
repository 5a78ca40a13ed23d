use serde::{Deserialize, Serialize};

/// Extraction rules for one family of job boards
///
/// Selector lists are ordered most specific first; the extractor takes the
/// first one that yields non-empty text. Rules are plain data so adding a
/// new site is a configuration change, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRule {
    /// Substrings matched against the page URL's host
    pub host_patterns: Vec<String>,

    /// CSS selectors tried in order for the position title
    pub title_selectors: Vec<String>,

    /// CSS selectors tried in order for the company name
    #[serde(default)]
    pub company_selectors: Vec<String>,
}

impl SiteRule {
    /// Whether this rule applies to the given host
    pub fn matches_host(&self, host: &str) -> bool {
        self.host_patterns.iter().any(|p| host.contains(p.as_str()))
    }
}

/// Built-in rules for the job boards the clipper knows about
///
/// Rules are evaluated in declaration order and the first host match wins,
/// so more specific boards must come before generic ones.
pub fn default_rules() -> Vec<SiteRule> {
    vec![
        SiteRule {
            host_patterns: vec!["linkedin.com".to_string()],
            title_selectors: vec![
                ".job-details-jobs-unified-top-card__job-title".to_string(),
                ".jobs-unified-top-card__job-title".to_string(),
                "h1".to_string(),
            ],
            company_selectors: vec![
                ".job-details-jobs-unified-top-card__company-name".to_string(),
                ".jobs-unified-top-card__company-name".to_string(),
            ],
        },
        SiteRule {
            host_patterns: vec!["indeed".to_string()],
            title_selectors: vec!["h1".to_string()],
            company_selectors: vec!["[data-company-name='true']".to_string()],
        },
        SiteRule {
            host_patterns: vec!["glassdoor".to_string()],
            title_selectors: vec![r#"[data-test="job-title"]"#.to_string()],
            company_selectors: vec![r#"[data-test="employer-name"]"#.to_string()],
        },
        SiteRule {
            host_patterns: vec!["wttj".to_string(), "welcometothejungle".to_string()],
            title_selectors: vec!["h1".to_string()],
            company_selectors: vec!["h2".to_string()],
        },
        SiteRule {
            host_patterns: vec!["hellowork".to_string()],
            title_selectors: vec!["h1".to_string()],
            company_selectors: vec![".offer-hero-company-name".to_string()],
        },
    ]
}
