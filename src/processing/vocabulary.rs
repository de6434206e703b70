//! Categorized skill vocabulary and its load-once cache

use crate::error::{MiniAtsError, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Skill category recognized by the matcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Hard,
    Tools,
    Soft,
}

impl SkillCategory {
    /// Every category, in the order results are built and reported
    pub const ALL: [SkillCategory; 3] = [SkillCategory::Hard, SkillCategory::Tools, SkillCategory::Soft];

    /// Parse a stored category string, tolerating surrounding whitespace and case
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "hard" => Some(SkillCategory::Hard),
            "tools" => Some(SkillCategory::Tools),
            "soft" => Some(SkillCategory::Soft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Hard => "hard",
            SkillCategory::Tools => "tools",
            SkillCategory::Soft => "soft",
        }
    }

    fn index(&self) -> usize {
        match self {
            SkillCategory::Hard => 0,
            SkillCategory::Tools => 1,
            SkillCategory::Soft => 2,
        }
    }
}

impl fmt::Display for SkillCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One raw `(name, category)` row from the backing store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRow {
    pub name: String,
    pub category: String,
}

impl SkillRow {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }
}

/// Read side of the vocabulary backing store
pub trait SkillSource {
    /// Return every stored row. Failures are reported as
    /// [`MiniAtsError::VocabularyUnavailable`].
    fn fetch_rows(&self) -> Result<Vec<SkillRow>>;
}

/// In-memory source for tests and library callers
impl SkillSource for Vec<SkillRow> {
    fn fetch_rows(&self) -> Result<Vec<SkillRow>> {
        Ok(self.clone())
    }
}

impl<S: SkillSource + ?Sized> SkillSource for Arc<S> {
    fn fetch_rows(&self) -> Result<Vec<SkillRow>> {
        (**self).fetch_rows()
    }
}

/// Lowercase skill phrases grouped by category. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillVocabulary {
    hard: Vec<String>,
    tools: Vec<String>,
    soft: Vec<String>,
}

impl SkillVocabulary {
    /// Build from raw rows. Rows with unrecognized categories or blank names
    /// are dropped; duplicates within a category keep their first position.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = SkillRow>,
    {
        let mut vocabulary = SkillVocabulary::default();
        let mut dropped = 0usize;

        for row in rows {
            let Some(category) = SkillCategory::parse(&row.category) else {
                debug!("Dropping skill '{}' with unrecognized category '{}'", row.name, row.category);
                dropped += 1;
                continue;
            };

            let name = row.name.trim().to_lowercase();
            if name.is_empty() {
                dropped += 1;
                continue;
            }

            let phrases = vocabulary.phrases_mut(category);
            if !phrases.contains(&name) {
                phrases.push(name);
            }
        }

        if vocabulary.is_empty() {
            return Err(MiniAtsError::VocabularyUnavailable(
                "backing store contains no usable skill rows".to_string(),
            ));
        }

        if dropped > 0 {
            debug!("Dropped {} unusable skill rows", dropped);
        }

        Ok(vocabulary)
    }

    /// Candidate phrases for a category, in load order
    pub fn phrases(&self, category: SkillCategory) -> &[String] {
        match category {
            SkillCategory::Hard => &self.hard,
            SkillCategory::Tools => &self.tools,
            SkillCategory::Soft => &self.soft,
        }
    }

    fn phrases_mut(&mut self, category: SkillCategory) -> &mut Vec<String> {
        match category {
            SkillCategory::Hard => &mut self.hard,
            SkillCategory::Tools => &mut self.tools,
            SkillCategory::Soft => &mut self.soft,
        }
    }

    pub fn len(&self) -> usize {
        self.hard.len() + self.tools.len() + self.soft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-category phrase counts, indexed like [`SkillCategory::ALL`]
    pub fn category_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for category in SkillCategory::ALL {
            counts[category.index()] = self.phrases(category).len();
        }
        counts
    }
}

/// Loads the vocabulary from a [`SkillSource`] at most once and hands out
/// shared references afterwards.
///
/// The cache is never refreshed on its own. Call [`VocabularyStore::invalidate`]
/// after the backing store changes.
pub struct VocabularyStore<S> {
    source: S,
    cache: OnceLock<Arc<SkillVocabulary>>,
}

impl<S: SkillSource> VocabularyStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: OnceLock::new(),
        }
    }

    /// Return the cached vocabulary, querying the source on first use
    pub fn load(&self) -> Result<Arc<SkillVocabulary>> {
        if let Some(vocabulary) = self.cache.get() {
            debug!("Using cached skill vocabulary");
            return Ok(Arc::clone(vocabulary));
        }

        let rows = self.source.fetch_rows()?;
        let vocabulary = Arc::new(SkillVocabulary::from_rows(rows)?);
        info!("Loaded skill vocabulary with {} skills", vocabulary.len());

        // A concurrent loader may have won; either value is equivalent.
        Ok(Arc::clone(self.cache.get_or_init(|| vocabulary)))
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// The cached vocabulary, if one was loaded. Never queries the source.
    pub fn cached(&self) -> Option<Arc<SkillVocabulary>> {
        self.cache.get().cloned()
    }

    /// Drop the cached vocabulary so the next `load` re-queries the source
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            info!("Skill vocabulary cache invalidated");
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
