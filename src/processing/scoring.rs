//! Fit scoring: per-category recall, weighted overall score and overlap sets

use crate::processing::skill_matcher::SkillMatchResult;
use crate::processing::vocabulary::SkillCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Weight of each category in the overall fit score
pub const HARD_WEIGHT: f64 = 0.6;
pub const TOOLS_WEIGHT: f64 = 0.2;
pub const SOFT_WEIGHT: f64 = 0.2;

/// Share of the job description's skills found in the resume, per category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub hard: f64,
    pub tools: f64,
    pub soft: f64,
}

impl CategoryScores {
    pub fn get(&self, category: SkillCategory) -> f64 {
        match category {
            SkillCategory::Hard => self.hard,
            SkillCategory::Tools => self.tools,
            SkillCategory::Soft => self.soft,
        }
    }

    fn set(&mut self, category: SkillCategory, value: f64) {
        match category {
            SkillCategory::Hard => self.hard = value,
            SkillCategory::Tools => self.tools = value,
            SkillCategory::Soft => self.soft = value,
        }
    }
}

/// Qualitative label for an overall fit score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitLabel {
    #[serde(rename = "Strong fit")]
    StrongFit,
    #[serde(rename = "Moderate fit")]
    ModerateFit,
    #[serde(rename = "Weak fit")]
    WeakFit,
    #[serde(rename = "Poor fit")]
    PoorFit,
}

impl FitLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitLabel::StrongFit => "Strong fit",
            FitLabel::ModerateFit => "Moderate fit",
            FitLabel::WeakFit => "Weak fit",
            FitLabel::PoorFit => "Poor fit",
        }
    }
}

impl fmt::Display for FitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Skills split by which side mentions them, across all categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapSets {
    /// In both the job description and the resume
    pub matched: BTreeSet<String>,
    /// In the job description only
    pub missing: BTreeSet<String>,
    /// In the resume only
    pub extra: BTreeSet<String>,
}

/// Recall-style ratio per category. A category the job description never
/// mentions scores 0.0.
pub fn compute_category_scores(jd: &SkillMatchResult, resume: &SkillMatchResult) -> CategoryScores {
    let mut scores = CategoryScores::default();

    for category in SkillCategory::ALL {
        let jd_skills = jd.get(category);
        if jd_skills.is_empty() {
            continue;
        }
        let matched = jd_skills.intersection(resume.get(category)).count();
        scores.set(category, matched as f64 / jd_skills.len() as f64);
    }

    scores
}

/// Weighted fit as a percentage rounded to one decimal place
pub fn overall_fit_score(scores: &CategoryScores) -> f64 {
    let score = HARD_WEIGHT * scores.hard + TOOLS_WEIGHT * scores.tools + SOFT_WEIGHT * scores.soft;
    round_one_decimal(score * 100.0)
}

/// Thresholds are inclusive lower bounds: 80, 60, 40
pub fn score_label(score: f64) -> FitLabel {
    if score >= 80.0 {
        FitLabel::StrongFit
    } else if score >= 60.0 {
        FitLabel::ModerateFit
    } else if score >= 40.0 {
        FitLabel::WeakFit
    } else {
        FitLabel::PoorFit
    }
}

pub fn compute_overlap_sets(jd: &SkillMatchResult, resume: &SkillMatchResult) -> OverlapSets {
    let jd_all = jd.all_skills();
    let resume_all = resume.all_skills();

    OverlapSets {
        matched: jd_all.intersection(&resume_all).cloned().collect(),
        missing: jd_all.difference(&resume_all).cloned().collect(),
        extra: resume_all.difference(&jd_all).cloned().collect(),
    }
}

/// Round to one decimal place the way the exact decimal expansion does:
/// an exact binary tie such as 1.25 goes to the even digit (1.2).
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}
