//! Name analysis.
//!
//! A pure computation over a short input string: character length, vowel and
//! consonant counts, and a derived complexity score. Nothing here touches
//! shared state, so it is safe to call from any number of request tasks.

use serde::Serialize;

/// Vowels matched case-insensitively.
const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

/// Result of analyzing a single name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameMetrics {
    /// The validated input, trimmed of surrounding whitespace
    pub name: String,
    /// Number of characters (Unicode scalar values)
    pub length: usize,
    pub vowel_count: usize,
    /// Alphabetic characters (any script) that are not vowels
    pub consonant_count: usize,
    /// `length * (vowels + 1) / (consonants + 1)`, rounded to two decimals
    pub complexity: f64,
}

impl NameMetrics {
    /// Complexity score for the given counts.
    ///
    /// The `+ 1` on both sides keeps the ratio defined when a name has no
    /// consonants (or no vowels), so the function is total.
    pub fn complexity_score(length: usize, vowel_count: usize, consonant_count: usize) -> f64 {
        let raw = length as f64 * (vowel_count as f64 + 1.0) / (consonant_count as f64 + 1.0);
        (raw * 100.0).round() / 100.0
    }
}

/// Reasons a name is rejected before analysis.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyzeError {
    #[error("name must not be empty")]
    Empty,

    #[error("name is {length} characters long, maximum is {max}")]
    TooLong { length: usize, max: usize },
}

/// How a single character is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Vowel,
    Consonant,
    Other,
}

fn classify(c: char) -> CharClass {
    if !c.is_alphabetic() {
        return CharClass::Other;
    }
    if VOWELS.contains(&c.to_ascii_lowercase()) {
        CharClass::Vowel
    } else {
        CharClass::Consonant
    }
}

/// Analyze `name`, rejecting empty input and input longer than `max_length`
/// characters after trimming.
pub fn analyze(name: &str, max_length: usize) -> Result<NameMetrics, AnalyzeError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AnalyzeError::Empty);
    }

    let length = name.chars().count();
    if length > max_length {
        return Err(AnalyzeError::TooLong {
            length,
            max: max_length,
        });
    }

    let (vowel_count, consonant_count) = name.chars().map(classify).fold(
        (0, 0),
        |(vowels, consonants), class| match class {
            CharClass::Vowel => (vowels + 1, consonants),
            CharClass::Consonant => (vowels, consonants + 1),
            CharClass::Other => (vowels, consonants),
        },
    );

    Ok(NameMetrics {
        name: name.to_string(),
        length,
        vowel_count,
        consonant_count,
        complexity: NameMetrics::complexity_score(length, vowel_count, consonant_count),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 100;

    #[test]
    fn test_analyze_hello() {
        let metrics = analyze("hello", MAX).unwrap();
        assert_eq!(metrics.name, "hello");
        assert_eq!(metrics.length, 5);
        assert_eq!(metrics.vowel_count, 2);
        assert_eq!(metrics.consonant_count, 3);
        assert_eq!(metrics.complexity, 3.75);
    }

    #[test]
    fn test_analyze_is_case_insensitive() {
        let lower = analyze("alice", MAX).unwrap();
        let upper = analyze("ALICE", MAX).unwrap();
        assert_eq!(lower.vowel_count, upper.vowel_count);
        assert_eq!(lower.consonant_count, upper.consonant_count);
        assert_eq!(upper.vowel_count, 3);
    }

    #[test]
    fn test_analyze_trims_surrounding_whitespace() {
        let metrics = analyze("  bob \t", MAX).unwrap();
        assert_eq!(metrics.name, "bob");
        assert_eq!(metrics.length, 3);
    }

    #[test]
    fn test_analyze_non_letters_count_only_toward_length() {
        // Inner space and digits are neither vowels nor consonants
        let metrics = analyze("Mary Ann 2", MAX).unwrap();
        assert_eq!(metrics.length, 10);
        assert_eq!(metrics.vowel_count, 2);
        assert_eq!(metrics.consonant_count, 5);
    }

    #[test]
    fn test_analyze_non_ascii_letters_are_consonants() {
        // Only a, e, i, o, u are vowels; accented letters fall to consonants
        let metrics = analyze("Zoë", MAX).unwrap();
        assert_eq!(metrics.length, 3);
        assert_eq!(metrics.vowel_count, 1);
        assert_eq!(metrics.consonant_count, 2);
    }

    #[test]
    fn test_analyze_non_latin_letters_are_consonants() {
        let metrics = analyze("жß", MAX).unwrap();
        assert_eq!(metrics.length, 2);
        assert_eq!(metrics.vowel_count, 0);
        assert_eq!(metrics.consonant_count, 2);
    }

    #[test]
    fn test_analyze_empty_is_rejected() {
        assert_eq!(analyze("", MAX), Err(AnalyzeError::Empty));
    }

    #[test]
    fn test_analyze_whitespace_only_is_rejected() {
        assert_eq!(analyze("   \n", MAX), Err(AnalyzeError::Empty));
    }

    #[test]
    fn test_analyze_too_long_is_rejected() {
        let name = "a".repeat(11);
        assert_eq!(
            analyze(&name, 10),
            Err(AnalyzeError::TooLong {
                length: 11,
                max: 10
            })
        );
    }

    #[test]
    fn test_analyze_exactly_max_length_is_accepted() {
        let name = "b".repeat(10);
        let metrics = analyze(&name, 10).unwrap();
        assert_eq!(metrics.length, 10);
        assert_eq!(metrics.consonant_count, 10);
    }

    #[test]
    fn test_analyze_length_bound_counts_chars_not_bytes() {
        // Four chars, eight bytes
        let metrics = analyze("ëëëë", 4).unwrap();
        assert_eq!(metrics.length, 4);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        for name in ["hello", "Jean-Luc", "x", "aeiou", "rhythm", "O'Brien 3rd"] {
            assert_eq!(analyze(name, MAX), analyze(name, MAX));
        }
    }

    #[test]
    fn test_counts_never_exceed_length() {
        for name in ["hello", "  a b c ", "1234", "ÅÄÖ", "Anne-Marie", "zzz", "_"] {
            let metrics = analyze(name, MAX).unwrap();
            assert!(metrics.vowel_count + metrics.consonant_count <= metrics.length);
        }
    }

    #[test]
    fn test_complexity_without_consonants() {
        // 5 * (5 + 1) / (0 + 1)
        let metrics = analyze("aeiou", MAX).unwrap();
        assert_eq!(metrics.complexity, 30.0);
    }

    #[test]
    fn test_complexity_without_letters() {
        let metrics = analyze("42", MAX).unwrap();
        assert_eq!(metrics.complexity, 2.0);
    }

    #[test]
    fn test_complexity_score_rounds_to_two_decimals() {
        // 7 * 2 / 6 = 2.333...
        assert_eq!(NameMetrics::complexity_score(7, 1, 5), 2.33);
    }

    #[test]
    fn test_analyze_error_display() {
        assert_eq!(AnalyzeError::Empty.to_string(), "name must not be empty");
        assert_eq!(
            AnalyzeError::TooLong { length: 120, max: 100 }.to_string(),
            "name is 120 characters long, maximum is 100"
        );
    }
}
