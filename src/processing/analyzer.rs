//! Analysis engine: runs one resume against one job description

use crate::error::Result;
use crate::processing::scoring::{
    compute_category_scores, compute_overlap_sets, overall_fit_score, score_label, CategoryScores,
    FitLabel, OverlapSets,
};
use crate::processing::skill_matcher::{SkillMatchResult, SkillMatcher};
use crate::processing::suggestions::generate_suggestions;
use crate::processing::vocabulary::{SkillCategory, SkillSource, SkillVocabulary, VocabularyStore};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Default cap on a job title taken from the job description's first line
pub const DEFAULT_JOB_TITLE_MAX_CHARS: usize = 80;

/// Inputs for one analysis, already decoded to text
#[derive(Debug, Clone, Copy)]
pub struct AnalysisRequest<'a> {
    pub job_description: &'a str,
    pub resume: &'a str,
    pub job_title: Option<&'a str>,
}

impl<'a> AnalysisRequest<'a> {
    pub fn new(job_description: &'a str, resume: &'a str) -> Self {
        Self {
            job_description,
            resume,
            job_title: None,
        }
    }

    pub fn with_job_title(mut self, job_title: Option<&'a str>) -> Self {
        self.job_title = job_title;
        self
    }
}

/// Structured result of one analysis, ready for a presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitAnalysis {
    pub job_skills: SkillMatchResult,
    pub resume_skills: SkillMatchResult,
    pub category_scores: CategoryScores,
    /// Percentage in [0, 100] with one decimal
    pub overall_score: f64,
    pub label: FitLabel,
    pub overlap: OverlapSets,
    pub job_title: Option<String>,
    pub suggestions: Vec<String>,
}

/// Coordinates vocabulary loading, matching, scoring and suggestions.
///
/// The vocabulary and the matcher compiled from it are built on first use
/// and shared by every later analysis.
pub struct AnalysisEngine<S> {
    store: VocabularyStore<S>,
    matcher: OnceLock<Arc<SkillMatcher>>,
    job_title_max_chars: usize,
}

impl<S: SkillSource> AnalysisEngine<S> {
    pub fn new(source: S) -> Self {
        Self {
            store: VocabularyStore::new(source),
            matcher: OnceLock::new(),
            job_title_max_chars: DEFAULT_JOB_TITLE_MAX_CHARS,
        }
    }

    pub fn with_job_title_max_chars(mut self, max_chars: usize) -> Self {
        self.job_title_max_chars = max_chars;
        self
    }

    /// The cached vocabulary, loading it if needed
    pub fn vocabulary(&self) -> Result<Arc<SkillVocabulary>> {
        self.store.load()
    }

    fn matcher(&self) -> Result<Arc<SkillMatcher>> {
        if let Some(matcher) = self.matcher.get() {
            return Ok(Arc::clone(matcher));
        }

        let vocabulary = self.store.load()?;
        let matcher = Arc::new(SkillMatcher::new(&vocabulary)?);
        debug!("Compiled skill matcher with {} candidates", matcher.candidate_count());

        Ok(Arc::clone(self.matcher.get_or_init(|| matcher)))
    }

    /// Extract skills from `text`. Empty text yields empty matches without
    /// touching the vocabulary.
    pub fn extract_skills(&self, text: &str) -> Result<SkillMatchResult> {
        if text.is_empty() {
            return Ok(SkillMatchResult::default());
        }
        Ok(self.matcher()?.find_matches(text))
    }

    pub fn analyze(&self, request: &AnalysisRequest<'_>) -> Result<FitAnalysis> {
        info!("Analyzing resume against job description");

        let job_skills = self.extract_skills(request.job_description)?;
        let resume_skills = self.extract_skills(request.resume)?;

        let category_scores = compute_category_scores(&job_skills, &resume_skills);
        let overall_score = overall_fit_score(&category_scores);
        let label = score_label(overall_score);
        let overlap = compute_overlap_sets(&job_skills, &resume_skills);

        let skill_to_category = skill_category_map(&job_skills);
        let job_title = resolve_job_title(
            request.job_title,
            request.job_description,
            self.job_title_max_chars,
        );

        let suggestions = generate_suggestions(&overlap.missing, &skill_to_category, job_title.as_deref());

        info!(
            "Fit score {:.1}% ({}); {} matched, {} missing, {} extra",
            overall_score,
            label,
            overlap.matched.len(),
            overlap.missing.len(),
            overlap.extra.len()
        );

        Ok(FitAnalysis {
            job_skills,
            resume_skills,
            category_scores,
            overall_score,
            label,
            overlap,
            job_title,
            suggestions,
        })
    }

    /// Forget the cached vocabulary and matcher; the next analysis reloads
    pub fn invalidate_vocabulary(&mut self) {
        self.matcher.take();
        self.store.invalidate();
    }

    pub fn is_vocabulary_loaded(&self) -> bool {
        self.store.is_loaded()
    }

    /// Size of the vocabulary if an analysis already loaded it
    pub fn loaded_vocabulary_size(&self) -> Option<usize> {
        self.store.cached().map(|vocabulary| vocabulary.len())
    }

    pub fn source(&self) -> &S {
        self.store.source()
    }
}

/// Skill -> category label from the job description's matches. Categories are
/// visited hard, tools, soft, so a skill listed under several ends up with the
/// last one.
pub fn skill_category_map(job_skills: &SkillMatchResult) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for category in SkillCategory::ALL {
        for skill in job_skills.get(category) {
            map.insert(skill.clone(), category.as_str().to_string());
        }
    }
    map
}

/// Explicit title when non-blank, otherwise the first line of the job
/// description cut to `max_chars` characters.
pub fn resolve_job_title(explicit: Option<&str>, job_description: &str, max_chars: usize) -> Option<String> {
    if let Some(title) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return Some(title.to_string());
    }

    let first_line = job_description.trim().lines().next()?.trim();
    let title: String = first_line.chars().take(max_chars).collect();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}
