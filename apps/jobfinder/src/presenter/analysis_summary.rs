use std::fmt;

use crate::models::AnalysisResult;

/// One-glance summary of what the backend inferred from a text query.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub roles: Vec<String>,
    pub skills: Vec<String>,
    pub remote_preferred: bool,
    pub confidence_percent: u32,
}

impl From<&AnalysisResult> for AnalysisSummary {
    fn from(analysis: &AnalysisResult) -> Self {
        Self {
            roles: analysis.predicted_roles.clone(),
            skills: analysis.mentioned_skills.clone(),
            remote_preferred: analysis.work_preferences.remote_preferred,
            confidence_percent: analysis.confidence_percent(),
        }
    }
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.roles.is_empty() {
            writeln!(f, "Predicted roles: {}", self.roles.join(", "))?;
        }
        if !self.skills.is_empty() {
            writeln!(f, "Skills mentioned: {}", self.skills.join(", "))?;
        }
        if self.remote_preferred {
            writeln!(f, "Preference: remote work")?;
        }
        write!(f, "Confidence: {}%", self.confidence_percent)
    }
}
