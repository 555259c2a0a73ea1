use serde::Serialize;

/// Scores at or above this value are labelled `Cancerous`.
pub const THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Diagnosis {
    #[serde(rename = "Cancerous")]
    Cancerous,
    #[serde(rename = "Non-Cancerous")]
    NonCancerous,
}

impl Diagnosis {
    pub fn from_score(score: f32) -> Self {
        if score >= THRESHOLD {
            Diagnosis::Cancerous
        } else {
            Diagnosis::NonCancerous
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Diagnosis::Cancerous => "Cancerous",
            Diagnosis::NonCancerous => "Non-Cancerous",
        }
    }
}
