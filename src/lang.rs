//! Portuguese-language heuristic for search results.
//!
//! Estimates whether a record is a Brazilian Portuguese edition using three
//! cheap signals: publisher/imprint keywords from the Brazilian publishing
//! industry, common Portuguese function words in the title, and common
//! Brazilian surnames in the author field. Best-effort directional
//! filtering, not language detection; false positives and negatives are
//! expected and fine.

use crate::book::Book;

/// Publisher and imprint names associated with Brazilian publishing.
const PUBLISHER_KEYWORDS: &[&str] = &[
    "editora",
    "companhia",
    "records",
    "martins",
    "fontes",
    "ática",
    "saraiva",
    "moderna",
    "ftd",
    "scipione",
    "cobogó",
    "intrínseca",
    "planet",
    "rocco",
    "zahar",
    "34",
    "leya",
    "quadrante",
    "biruta",
    "perspectiva",
];

/// Short Portuguese function words (articles, prepositions), each with a
/// trailing space so they match as words rather than arbitrary substrings.
const FUNCTION_WORDS: &[&str] = &[
    "o ", "a ", "os ", "as ", "de ", "da ", "do ", "dos ", "das ", "em ", "para ", "com ", "sem ",
    "por ", "como ", "mais ", "muito ", "muita ",
];

/// Common Brazilian surnames.
const SURNAMES: &[&str] = &[
    "silva", "santos", "souza", "costa", "ferreira", "alves", "pereira", "lima", "gomes",
    "ribeiro",
];

/// Whether the (title, author, publisher) triple shows Portuguese signals.
///
/// True if any of:
/// - a publisher keyword appears in the title, author, or publisher;
/// - a function word appears in the title AND the title is more than two
///   characters longer than the word (so a word can't match merely by
///   being the entire short title);
/// - a surname appears in the author.
pub fn looks_portuguese(title: &str, author: &str, publisher: &str) -> bool {
    let title = title.to_lowercase();
    let author = author.to_lowercase();
    let publisher = publisher.to_lowercase();

    for keyword in PUBLISHER_KEYWORDS {
        if title.contains(keyword) || author.contains(keyword) || publisher.contains(keyword) {
            return true;
        }
    }

    let title_len = title.chars().count();
    for word in FUNCTION_WORDS {
        if title.contains(word) && title_len > word.chars().count() + 2 {
            return true;
        }
    }

    SURNAMES.iter().any(|name| author.contains(name))
}

/// [`looks_portuguese`] over a normalized record.
pub fn book_looks_portuguese(book: &Book) -> bool {
    looks_portuguese(&book.title, &book.author, &book.publisher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publisher_keyword_matches() {
        assert!(looks_portuguese("Memórias Póstumas", "", "Editora Globo"));
        assert!(looks_portuguese("", "", "Companhia das Letras"));
    }

    #[test]
    fn function_word_in_long_title() {
        assert!(looks_portuguese("A Hora da Estrela", "Clarice Lispector", ""));
        assert!(looks_portuguese("Vidas Secas e outros", "", ""));
    }

    #[test]
    fn short_title_does_not_match_on_function_word_alone() {
        // "as " would match only because it nearly is the whole title.
        assert!(!looks_portuguese("as i", "", ""));
    }

    #[test]
    fn surname_matches() {
        assert!(looks_portuguese("Collected Poems", "João Cabral de Melo Silva", ""));
        assert!(looks_portuguese("", "Graciliano Ramos Pereira", ""));
    }

    #[test]
    fn english_record_does_not_match() {
        assert!(!looks_portuguese("Wuthering Heights", "Emily Brontë", "Penguin"));
    }
}
