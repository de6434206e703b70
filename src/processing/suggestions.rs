//! Templated recommendations for skills the resume is missing

use crate::processing::vocabulary::SkillCategory;
use std::collections::{BTreeSet, HashMap};

/// Template family for a missing skill. Any category string other than the
/// three known ones falls back to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionKind {
    Hard,
    Tools,
    Soft,
    Unknown,
}

impl SuggestionKind {
    /// Kind for a category label; a skill with no label is treated as hard
    pub fn for_category(category: Option<&str>) -> Self {
        match category {
            None => SuggestionKind::Hard,
            Some(label) => SkillCategory::parse(label)
                .map(SuggestionKind::from)
                .unwrap_or(SuggestionKind::Unknown),
        }
    }

    fn render(&self, skill: &str, job_title: Option<&str>) -> String {
        match self {
            SuggestionKind::Hard => hard_skill_suggestion(skill, job_title),
            SuggestionKind::Tools => tool_suggestion(skill),
            SuggestionKind::Soft => soft_skill_suggestion(skill),
            SuggestionKind::Unknown => fallback_suggestion(skill),
        }
    }
}

impl From<SkillCategory> for SuggestionKind {
    fn from(category: SkillCategory) -> Self {
        match category {
            SkillCategory::Hard => SuggestionKind::Hard,
            SkillCategory::Tools => SuggestionKind::Tools,
            SkillCategory::Soft => SuggestionKind::Soft,
        }
    }
}

pub const COVERAGE_OK_SUGGESTION: &str = "Your resume already covers the key skills in this job description. \
Focus on making your existing bullets more quantitative and impact-driven (metrics, scale, outcomes).";

pub const PRIORITIZE_SUGGESTION: &str = "Prioritize adding 2-4 of the most important missing skills, and rework \
one or two bullets per experience to weave them in naturally instead of listing them all at once.";

/// Turn missing skills into ordered, human-readable suggestions.
///
/// Skills are visited in lexicographic order. `skill_to_category` maps a
/// skill to its category label; unmapped skills are treated as hard skills.
/// A non-blank `job_title` personalizes hard-skill suggestions only.
pub fn generate_suggestions(
    missing_skills: &BTreeSet<String>,
    skill_to_category: &HashMap<String, String>,
    job_title: Option<&str>,
) -> Vec<String> {
    if missing_skills.is_empty() {
        return vec![COVERAGE_OK_SUGGESTION.to_string()];
    }

    let job_title = job_title.map(str::trim).filter(|title| !title.is_empty());

    let mut suggestions: Vec<String> = missing_skills
        .iter()
        .map(|skill| {
            let category = skill_to_category.get(skill).map(String::as_str);
            SuggestionKind::for_category(category).render(skill, job_title)
        })
        .collect();

    suggestions.push(PRIORITIZE_SUGGESTION.to_string());
    suggestions
}

fn hard_skill_suggestion(skill: &str, job_title: Option<&str>) -> String {
    let title_fragment = job_title
        .map(|title| format!(" for this {} role", title))
        .unwrap_or_default();

    format!(
        "Add a concrete example of using {skill} in your Experience or Projects section{title_fragment}, \
for example: \"Used {skill} to analyze data, identify trends, and support decisions.\""
    )
}

fn tool_suggestion(skill: &str) -> String {
    format!(
        "Either list {skill} explicitly in your Skills section or add a bullet where you used it in a real \
context (e.g. \"Built dashboards using {skill} to track KPIs and report findings.\")."
    )
}

fn soft_skill_suggestion(skill: &str) -> String {
    format!(
        "Demonstrate {skill} with a specific scenario rather than listing it alone, for example: \
\"Led a cross-functional team and used strong {skill} to align stakeholders and ship on time.\""
    )
}

fn fallback_suggestion(skill: &str) -> String {
    format!(
        "Consider mentioning {skill} in your Skills or Experience section if you truly have it, \
and back it up with a concrete example."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(skills: &[&str]) -> BTreeSet<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    fn categories(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(skill, category)| (skill.to_string(), category.to_string()))
            .collect()
    }

    #[test]
    fn test_no_missing_skills() {
        let suggestions = generate_suggestions(&BTreeSet::new(), &HashMap::new(), Some("Data Analyst"));

        assert_eq!(suggestions, vec![COVERAGE_OK_SUGGESTION.to_string()]);
    }

    #[test]
    fn test_order_and_closing_suggestion() {
        let skill_map = categories(&[("tableau", "tools"), ("communication", "soft")]);

        let suggestions = generate_suggestions(&missing(&["tableau", "communication"]), &skill_map, None);

        assert_eq!(suggestions.len(), 3);
        assert!(suggestions[0].starts_with("Demonstrate communication"));
        assert!(suggestions[1].starts_with("Either list tableau"));
        assert_eq!(suggestions[2], PRIORITIZE_SUGGESTION);
    }

    #[test]
    fn test_job_title_only_personalizes_hard_skills() {
        let skill_map = categories(&[("sql", "hard"), ("excel", "tools"), ("teamwork", "soft")]);

        let suggestions = generate_suggestions(
            &missing(&["excel", "sql", "teamwork"]),
            &skill_map,
            Some("  Data Analyst "),
        );

        assert!(!suggestions[0].contains("Data Analyst"));
        assert!(suggestions[1].contains("Projects section for this Data Analyst role,"));
        assert!(!suggestions[2].contains("Data Analyst"));
    }

    #[test]
    fn test_blank_job_title_is_omitted() {
        let skill_map = categories(&[("sql", "hard")]);

        for title in [None, Some(""), Some("   ")] {
            let suggestions = generate_suggestions(&missing(&["sql"]), &skill_map, title);
            assert!(suggestions[0].contains("Projects section, for example"));
            assert!(!suggestions[0].contains("for this"));
        }
    }

    #[test]
    fn test_unmapped_skill_defaults_to_hard() {
        let suggestions = generate_suggestions(&missing(&["kubernetes"]), &HashMap::new(), None);

        assert!(suggestions[0].starts_with("Add a concrete example of using kubernetes"));
    }

    #[test]
    fn test_unknown_category_uses_fallback() {
        let skill_map = categories(&[("juggling", "hobby")]);

        let suggestions = generate_suggestions(&missing(&["juggling"]), &skill_map, None);

        assert!(suggestions[0].starts_with("Consider mentioning juggling"));
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_suggestion_kind_mapping() {
        assert_eq!(SuggestionKind::for_category(None), SuggestionKind::Hard);
        assert_eq!(SuggestionKind::for_category(Some("hard")), SuggestionKind::Hard);
        assert_eq!(SuggestionKind::for_category(Some("tools")), SuggestionKind::Tools);
        assert_eq!(SuggestionKind::for_category(Some("soft")), SuggestionKind::Soft);
        assert_eq!(SuggestionKind::for_category(Some("other")), SuggestionKind::Unknown);
    }
}
