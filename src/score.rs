//! Relevance scoring for search results.
//!
//! Pure and deterministic: the same (record, query) pair always produces
//! the same score, so the aggregator's ranking is reproducible for a fixed
//! set of provider responses.

use crate::lang::looks_portuguese;

/// Score a record's match against the original query.
///
/// Signals are additive:
/// - title equals the query (case-insensitive): +100; else title contains
///   the query: +50;
/// - author equals the query: +80; else author contains the query: +40;
/// - the record shows Portuguese signals: +20.
pub fn relevance(title: &str, author: &str, publisher: &str, query: &str) -> u32 {
    let query = query.to_lowercase();
    let title_lower = title.to_lowercase();
    let author_lower = author.to_lowercase();

    let mut score = 0;

    if title_lower == query {
        score += 100;
    } else if title_lower.contains(&query) {
        score += 50;
    }

    if author_lower == query {
        score += 80;
    } else if author_lower.contains(&query) {
        score += 40;
    }

    if looks_portuguese(title, author, publisher) {
        score += 20;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_title_match_scores_at_least_100() {
        let score = relevance("1984", "George Orwell", "Secker & Warburg", "1984");
        assert!(score >= 100);
    }

    #[test]
    fn substring_title_match() {
        assert_eq!(relevance("Moby Dick; or, The Whale", "", "", "moby dick"), 50);
    }

    #[test]
    fn author_match_is_additive_with_title() {
        // Title and author both contain the query.
        let score = relevance("Machado de Assis: obras", "Machado de Assis", "", "machado de assis");
        assert_eq!(score, 50 + 80 + 20);
    }

    #[test]
    fn portuguese_bonus() {
        let with = relevance("Dom Casmurro", "Machado de Assis", "Editora Garnier", "dom casmurro");
        let without = relevance("Dom Casmurro", "John Smith", "Penguin", "dom casmurro");
        assert_eq!(with - without, 20);
    }

    #[test]
    fn no_match_scores_zero() {
        assert_eq!(relevance("Moby Dick", "Herman Melville", "Harper", "1984"), 0);
    }

    #[test]
    fn deterministic() {
        let a = relevance("Vidas Secas", "Graciliano Ramos", "Record", "vidas secas");
        let b = relevance("Vidas Secas", "Graciliano Ramos", "Record", "vidas secas");
        assert_eq!(a, b);
    }
}
