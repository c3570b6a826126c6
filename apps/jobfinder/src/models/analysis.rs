use serde::{Deserialize, Serialize};

use super::job::null_as_default;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkPreferences {
    #[serde(default)]
    pub remote_preferred: bool,
}

/// Backend inference over a free-text query. Only the text workflow sees one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub predicted_roles: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mentioned_skills: Vec<String>,
    #[serde(default)]
    pub work_preferences: WorkPreferences,
    /// 0.0 – 1.0
    #[serde(default)]
    pub confidence: f32,
}

impl AnalysisResult {
    /// Location filter for the follow-up job search.
    pub fn location_filter(&self) -> &'static str {
        if self.work_preferences.remote_preferred {
            "remote"
        } else {
            ""
        }
    }

    /// Confidence as a whole percentage, clamped to 0–100.
    pub fn confidence_percent(&self) -> u32 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u32
    }
}
