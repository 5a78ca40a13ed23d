use serde::{Deserialize, Serialize};

/// Substituted when no tier could resolve a company name
pub const UNKNOWN_COMPANY: &str = "Unknown Company";

/// Substituted when no tier could resolve a position title
pub const UNKNOWN_POSITION: &str = "Unknown Position";

/// Pipeline status of a captured application
///
/// Records produced by the extractor always start out `Pending`; the
/// dashboard moves them through the rest of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
}

/// A job posting captured from a career page
///
/// Immutable once produced: the extractor builds it, the invoker hands it
/// to the submit client, nobody mutates it in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedJobRecord {
    /// Company offering the position
    pub company: String,

    /// Position title as shown on the posting
    pub position: String,

    /// Link to the company page (the capturing page's URL)
    pub company_link: String,

    /// Link to the offer itself (the capturing page's URL)
    pub offer_link: String,

    /// Pipeline status, always `Pending` for fresh captures
    #[serde(rename = "final_status")]
    pub status: ApplicationStatus,

    /// Capture date in the viewer's local timezone, `YYYY-MM-DD`
    #[serde(rename = "dm_sent_date")]
    pub captured_date: String,
}

impl ScrapedJobRecord {
    /// Create a record for a capture taken right now
    ///
    /// Empty fields are mapped to the sentinel strings so `company` and
    /// `position` are never empty in the output.
    pub fn new(company: String, position: String, url: &str) -> Self {
        Self {
            company: non_empty_or(company, UNKNOWN_COMPANY),
            position: non_empty_or(position, UNKNOWN_POSITION),
            company_link: url.to_string(),
            offer_link: url.to_string(),
            status: ApplicationStatus::Pending,
            captured_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        }
    }

    /// Whether the capture resolved an actual position title
    ///
    /// A record whose position is the sentinel is defined as not
    /// actionable and must not be submitted.
    pub fn is_actionable(&self) -> bool {
        self.position != UNKNOWN_POSITION
    }
}

fn non_empty_or(value: String, sentinel: &str) -> String {
    if value.is_empty() {
        sentinel.to_string()
    } else {
        value
    }
}
