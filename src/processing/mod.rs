//! Skill extraction and scoring engine

pub mod normalizer;
pub mod vocabulary;
pub mod skill_matcher;
pub mod scoring;
pub mod suggestions;
pub mod analyzer;
