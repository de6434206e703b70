//! Report structures wrapping a fit analysis with run metadata

use crate::processing::analyzer::FitAnalysis;
use crate::processing::scoring::{round_one_decimal, HARD_WEIGHT, SOFT_WEIGHT, TOOLS_WEIGHT};
use crate::processing::vocabulary::SkillCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a formatter needs to present one analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub analysis: FitAnalysis,

    /// Per-category coverage rows, in hard, tools, soft order
    pub breakdown: Vec<CategoryBreakdown>,

    pub metadata: ReportMetadata,
}

/// Coverage of one skill category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: SkillCategory,

    /// Coverage as a percentage with one decimal
    pub score_percentage: f64,

    /// Weight in the overall score, as a percentage
    pub weight_percentage: f64,

    pub job_skill_count: usize,
    pub matched_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,

    /// Version of mini-ats that produced the report
    pub version: String,

    pub resume_file: String,
    pub job_file: String,

    /// Extraction plus analysis time
    pub processing_time_ms: u64,

    /// Number of skill phrases in the vocabulary; `None` when the analysis
    /// never needed to load it
    pub vocabulary_size: Option<usize>,
}

impl ReportMetadata {
    pub fn new(resume_path: &Path, job_path: &Path, processing_time_ms: u64, vocabulary_size: Option<usize>) -> Self {
        Self {
            generated_at: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: display_name(resume_path),
            job_file: display_name(job_path),
            processing_time_ms,
            vocabulary_size,
        }
    }
}

impl FitReport {
    pub fn new(analysis: FitAnalysis, metadata: ReportMetadata) -> Self {
        let breakdown = SkillCategory::ALL
            .iter()
            .map(|&category| Self::category_breakdown(&analysis, category))
            .collect();

        Self {
            analysis,
            breakdown,
            metadata,
        }
    }

    fn category_breakdown(analysis: &FitAnalysis, category: SkillCategory) -> CategoryBreakdown {
        let job_skills = analysis.job_skills.get(category);
        let resume_skills = analysis.resume_skills.get(category);
        let weight = match category {
            SkillCategory::Hard => HARD_WEIGHT,
            SkillCategory::Tools => TOOLS_WEIGHT,
            SkillCategory::Soft => SOFT_WEIGHT,
        };

        CategoryBreakdown {
            category,
            score_percentage: round_one_decimal(analysis.category_scores.get(category) * 100.0),
            weight_percentage: weight * 100.0,
            job_skill_count: job_skills.len(),
            matched_count: job_skills.intersection(resume_skills).count(),
        }
    }

    /// Heading line for the report, personalized when a job title is known
    pub fn title(&self) -> String {
        match &self.analysis.job_title {
            Some(title) => format!("Skill Fit Report: {}", title),
            None => "Skill Fit Report".to_string(),
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisRequest;
    use crate::processing::vocabulary::SkillRow;
    use crate::AnalysisEngine;

    fn sample_analysis() -> FitAnalysis {
        let engine = AnalysisEngine::new(vec![
            SkillRow::new("python", "hard"),
            SkillRow::new("sql", "hard"),
            SkillRow::new("tableau", "tools"),
            SkillRow::new("communication", "soft"),
        ]);
        let request = AnalysisRequest::new(
            "Data Analyst\nWe need SQL, Python, Tableau and communication",
            "Python and SQL every day",
        );
        engine.analyze(&request).unwrap()
    }

    #[test]
    fn test_breakdown_rows() {
        let metadata = ReportMetadata::new(Path::new("/tmp/cv.pdf"), Path::new("jd.txt"), 12, Some(4));
        let report = FitReport::new(sample_analysis(), metadata);

        assert_eq!(report.breakdown.len(), 3);
        assert_eq!(report.breakdown[0].category, SkillCategory::Hard);
        assert_eq!(report.breakdown[0].score_percentage, 100.0);
        assert_eq!(report.breakdown[0].weight_percentage, 60.0);
        assert_eq!(report.breakdown[0].matched_count, 2);
        assert_eq!(report.breakdown[1].score_percentage, 0.0);
        assert_eq!(report.breakdown[2].job_skill_count, 1);
    }

    #[test]
    fn test_metadata_and_title() {
        let metadata = ReportMetadata::new(Path::new("/tmp/cv.pdf"), Path::new("jd.txt"), 12, Some(4));
        let report = FitReport::new(sample_analysis(), metadata);

        assert_eq!(report.metadata.resume_file, "cv.pdf");
        assert_eq!(report.metadata.job_file, "jd.txt");
        assert_eq!(report.title(), "Skill Fit Report: Data Analyst");
    }
}
