use serde::{Deserialize, Serialize};

pub const MAX_SCORE: u32 = 100;

/// Score and exactly two suggestions for one review category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub score: u32, // 0 – 100
    pub suggestions: [String; 2],
}

/// Structured review of a resume against a job description.
/// The four category names are fixed; the model must produce all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeReview {
    pub skills_match: CategoryScore,
    pub experience_relevance: CategoryScore,
    pub impact_and_achievements: CategoryScore,
    pub formatting_and_clarity: CategoryScore,
    pub feedback: String,
}

impl ResumeReview {
    pub fn categories(&self) -> [(&'static str, &CategoryScore); 4] {
        [
            ("skills_match", &self.skills_match),
            ("experience_relevance", &self.experience_relevance),
            ("impact_and_achievements", &self.impact_and_achievements),
            ("formatting_and_clarity", &self.formatting_and_clarity),
        ]
    }

    /// Name of the first category whose score is above `MAX_SCORE`, if any.
    pub fn out_of_range_category(&self) -> Option<&'static str> {
        self.categories()
            .into_iter()
            .find(|(_, category)| category.score > MAX_SCORE)
            .map(|(name, _)| name)
    }
}
