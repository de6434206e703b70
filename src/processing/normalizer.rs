//! Text normalization into the canonical form used for skill matching

use regex::Regex;
use std::collections::HashSet;

/// Lowercases text and reduces it to letters, digits and the symbols that
/// occur inside skill names (`c++`, `c#`, `node.js`, `ci/cd`).
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    strip_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        // Whitespace is not in the kept set, so a single pass also collapses
        // whitespace runs.
        let strip_regex = Regex::new(r"[^a-z0-9#+./]+")
            .expect("Invalid strip regex");

        Self { strip_regex }
    }

    /// Canonical form: lowercase, unmatchable characters replaced by single
    /// spaces, trimmed. Empty input yields an empty string.
    pub fn normalize(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let lowered = text.to_lowercase();
        self.strip_regex
            .replace_all(&lowered, " ")
            .trim()
            .to_string()
    }

    /// Split the canonical form on whitespace
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.normalize(text)
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    /// Token set with a naive singular form added for every token that ends in
    /// `s` and is longer than three characters ("databases" adds "database").
    ///
    /// This over-matches ("class" adds "clas") and under-matches irregular
    /// plurals; both are accepted.
    pub fn build_token_set(&self, text: &str) -> HashSet<String> {
        let tokens = self.tokenize(text);
        let mut token_set: HashSet<String> = tokens.iter().cloned().collect();

        for token in &tokens {
            if token.len() > 3 {
                if let Some(singular) = token.strip_suffix('s') {
                    token_set.insert(singular.to_string());
                }
            }
        }

        token_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_keeps_skill_symbols() {
        let normalizer = TextNormalizer::new();
        let text = "Experience with C++, C#, Node.js and CI/CD!";

        assert_eq!(
            normalizer.normalize(text),
            "experience with c++ c# node.js and ci/cd"
        );
    }

    #[test]
    fn test_normalize_collapses_whitespace_and_punctuation() {
        let normalizer = TextNormalizer::new();
        let text = "  Python,\t\tSQL;\n\n(Tableau)  -- Excel  ";

        assert_eq!(normalizer.normalize(text), "python sql tableau excel");
    }

    #[test]
    fn test_normalize_empty_and_blank() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("   \n\t "), "");
        assert_eq!(normalizer.normalize("!!! ---"), "");
    }

    #[test]
    fn test_normalize_drops_non_ascii_letters() {
        let normalizer = TextNormalizer::new();

        assert_eq!(normalizer.normalize("Café Résumé"), "caf r sum");
    }

    #[test]
    fn test_tokenize() {
        let normalizer = TextNormalizer::new();

        let tokens = normalizer.tokenize("Built Python scripts and SQL queries");
        assert_eq!(
            tokens,
            vec!["built", "python", "scripts", "and", "sql", "queries"]
        );

        assert!(normalizer.tokenize("").is_empty());
    }

    #[test]
    fn test_token_set_singularization() {
        let normalizer = TextNormalizer::new();

        let tokens = normalizer.build_token_set("Relational databases and APIs, gas");

        assert!(tokens.contains("databases"));
        assert!(tokens.contains("database"));
        assert!(tokens.contains("apis"));
        assert!(tokens.contains("api"));
        // Too short to be stripped
        assert!(tokens.contains("gas"));
        assert!(!tokens.contains("ga"));
    }

    #[test]
    fn test_token_set_accepts_crude_over_matching() {
        let normalizer = TextNormalizer::new();

        let tokens = normalizer.build_token_set("class business");

        assert!(tokens.contains("clas"));
        assert!(tokens.contains("busines"));
    }
}
