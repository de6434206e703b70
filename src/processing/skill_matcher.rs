//! Skill extraction: matching free text against the categorized vocabulary

use crate::error::{MiniAtsError, Result};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::vocabulary::{SkillCategory, SkillVocabulary};
use aho_corasick::AhoCorasick;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Matched vocabulary phrases per category, as they appear in the vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    pub hard: BTreeSet<String>,
    pub tools: BTreeSet<String>,
    pub soft: BTreeSet<String>,
}

impl SkillMatchResult {
    pub fn get(&self, category: SkillCategory) -> &BTreeSet<String> {
        match category {
            SkillCategory::Hard => &self.hard,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Soft => &self.soft,
        }
    }

    pub fn insert(&mut self, category: SkillCategory, skill: impl Into<String>) -> bool {
        let set = match category {
            SkillCategory::Hard => &mut self.hard,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::Soft => &mut self.soft,
        };
        set.insert(skill.into())
    }

    /// Union of every category
    pub fn all_skills(&self) -> BTreeSet<String> {
        self.hard
            .iter()
            .chain(&self.tools)
            .chain(&self.soft)
            .cloned()
            .collect()
    }

    pub fn total(&self) -> usize {
        self.hard.len() + self.tools.len() + self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone)]
enum CandidateTest {
    /// Single-word phrase, looked up in the token set
    Token(String),
    /// Multi-word phrase, index into the phrase automaton's patterns
    Phrase(usize),
}

#[derive(Debug, Clone)]
struct Candidate {
    original: String,
    category: SkillCategory,
    test: CandidateTest,
}

/// Precompiled matcher over one vocabulary
///
/// Single-word phrases are tested against the text's token set (which carries
/// the naive singular forms). Multi-word phrases are tested for containment in
/// the space-padded canonical text. A single-word phrase is never checked
/// against word boundaries beyond what tokenization gives, so "sql" does not
/// match "mysql" but "c" would match a stray "c" token.
pub struct SkillMatcher {
    normalizer: TextNormalizer,
    candidates: Vec<Candidate>,
    phrase_matcher: Option<AhoCorasick>,
    phrase_count: usize,
}

impl SkillMatcher {
    pub fn new(vocabulary: &SkillVocabulary) -> Result<Self> {
        let normalizer = TextNormalizer::new();
        let mut candidates = Vec::with_capacity(vocabulary.len());
        let mut phrase_ids: HashMap<String, usize> = HashMap::new();
        let mut phrases: Vec<String> = Vec::new();

        for category in SkillCategory::ALL {
            for skill in vocabulary.phrases(category) {
                let canonical = normalizer.normalize(skill);
                if canonical.is_empty() {
                    debug!("Skipping skill '{}' with empty canonical form", skill);
                    continue;
                }

                let test = if canonical.contains(' ') {
                    let id = *phrase_ids.entry(canonical.clone()).or_insert_with(|| {
                        phrases.push(canonical);
                        phrases.len() - 1
                    });
                    CandidateTest::Phrase(id)
                } else {
                    CandidateTest::Token(canonical)
                };

                candidates.push(Candidate {
                    original: skill.clone(),
                    category,
                    test,
                });
            }
        }

        let phrase_matcher = if phrases.is_empty() {
            None
        } else {
            // Standard match semantics so overlapping search reports every phrase
            let automaton = AhoCorasick::new(&phrases).map_err(|e| {
                MiniAtsError::AnalysisFailed(format!("Failed to build skill matcher: {}", e))
            })?;
            Some(automaton)
        };

        Ok(Self {
            normalizer,
            candidates,
            phrase_matcher,
            phrase_count: phrases.len(),
        })
    }

    /// Match `text` against every candidate. Empty text matches nothing.
    pub fn find_matches(&self, text: &str) -> SkillMatchResult {
        let mut result = SkillMatchResult::default();
        if text.is_empty() {
            return result;
        }

        let cleaned = self.normalizer.normalize(text);
        let token_set = self.normalizer.build_token_set(&cleaned);
        let span = format!(" {} ", cleaned);

        let mut phrase_hits = vec![false; self.phrase_count];
        if let Some(automaton) = &self.phrase_matcher {
            for found in automaton.find_overlapping_iter(&span) {
                phrase_hits[found.pattern().as_usize()] = true;
            }
        }

        for candidate in &self.candidates {
            let hit = match &candidate.test {
                CandidateTest::Token(token) => token_set.contains(token),
                CandidateTest::Phrase(id) => phrase_hits[*id],
            };
            if hit {
                result.insert(candidate.category, candidate.original.clone());
            }
        }

        debug!(
            "Matched {} skills ({} hard, {} tools, {} soft)",
            result.total(),
            result.hard.len(),
            result.tools.len(),
            result.soft.len()
        );

        result
    }

    /// Number of candidates with a non-empty canonical form
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }
}

/// One-shot match of `text` against `vocabulary`
pub fn match_skills(text: &str, vocabulary: &SkillVocabulary) -> Result<SkillMatchResult> {
    if text.is_empty() {
        return Ok(SkillMatchResult::default());
    }
    Ok(SkillMatcher::new(vocabulary)?.find_matches(text))
}
