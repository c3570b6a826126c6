use std::fmt;

use crate::models::Job;

const DESCRIPTION_LIMIT: usize = 150;
const VISIBLE_TAGS: usize = 3;

/// Display-ready form of a single `Job`.
#[derive(Debug, Clone, PartialEq)]
pub struct JobCard {
    pub title: String,
    pub source: Option<String>,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub description: Option<String>,
    pub posted_date: Option<String>,
    pub tags: Vec<String>,
    pub hidden_tags: usize,
    pub link: Option<String>,
}

impl JobCard {
    pub fn from_job(job: &Job) -> Self {
        Self {
            title: job.title.clone(),
            source: job.source.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            salary: non_empty(&job.salary),
            description: non_empty(&job.description).map(|d| truncate(&d, DESCRIPTION_LIMIT)),
            posted_date: non_empty(&job.posted_date),
            tags: job.tags.iter().take(VISIBLE_TAGS).cloned().collect(),
            hidden_tags: job.tags.len().saturating_sub(VISIBLE_TAGS),
            link: non_empty(&job.url),
        }
    }

    pub fn link_label(&self) -> &'static str {
        if self.link.is_some() {
            "View Job →"
        } else {
            "No Link Available"
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

/// Cuts `text` to `limit` characters, appending `...` when shortened.
pub fn truncate(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

impl fmt::Display for JobCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(source) => writeln!(f, "{}  [{source}]", self.title)?,
            None => writeln!(f, "{}", self.title)?,
        }
        writeln!(f, "  {} · {}", self.company, self.location)?;
        if let Some(salary) = &self.salary {
            writeln!(f, "  Salary: {salary}")?;
        }
        if let Some(description) = &self.description {
            writeln!(f, "  {description}")?;
        }
        if let Some(posted) = &self.posted_date {
            writeln!(f, "  Posted: {posted}")?;
        }
        if !self.tags.is_empty() {
            write!(f, "  Tags: {}", self.tags.join(", "))?;
            if self.hidden_tags > 0 {
                write!(f, " +{} more", self.hidden_tags)?;
            }
            writeln!(f)?;
        }
        match &self.link {
            Some(url) => write!(f, "  {} {url}", self.link_label()),
            None => write!(f, "  {}", self.link_label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> Job {
        Job {
            title: "Senior Rust Developer".to_string(),
            company: "Innovation Labs".to_string(),
            location: "Remote".to_string(),
            salary: Some("$70,000 - $120,000".to_string()),
            description: Some("Experienced developer needed.".to_string()),
            url: Some("https://example.com/job/2".to_string()),
            source: Some("MockData".to_string()),
            posted_date: Some("2 days ago".to_string()),
            tags: vec![
                "programming".to_string(),
                "software".to_string(),
                "remote".to_string(),
                "rust".to_string(),
                "tokio".to_string(),
            ],
        }
    }

    #[test]
    fn test_truncate_long_description() {
        let long = "a".repeat(200);
        let out = truncate(&long, 150);
        assert_eq!(out.len(), 153);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_keeps_short_text() {
        assert_eq!(truncate("short", 150), "short");
        assert_eq!(truncate(&"b".repeat(150), 150), "b".repeat(150));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "é".repeat(160);
        let out = truncate(&text, 150);
        assert_eq!(out.chars().count(), 153);
    }

    #[test]
    fn test_card_shows_three_tags_and_overflow_count() {
        let card = JobCard::from_job(&job());
        assert_eq!(card.tags, vec!["programming", "software", "remote"]);
        assert_eq!(card.hidden_tags, 2);
        assert!(card.to_string().contains("+2 more"));
    }

    #[test]
    fn test_card_without_url_has_no_link() {
        let mut job = job();
        job.url = None;
        let card = JobCard::from_job(&job);
        assert_eq!(card.link_label(), "No Link Available");
        assert!(card.to_string().ends_with("No Link Available"));
    }

    #[test]
    fn test_card_omits_blank_optional_fields() {
        let mut job = job();
        job.salary = Some("  ".to_string());
        job.posted_date = None;
        job.tags.clear();
        let rendered = JobCard::from_job(&job).to_string();
        assert!(!rendered.contains("Salary"));
        assert!(!rendered.contains("Posted"));
        assert!(!rendered.contains("Tags"));
        assert!(rendered.contains("View Job → https://example.com/job/2"));
    }
}
