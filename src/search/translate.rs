//! Query term translation
//!
//! Maps common abbreviations and number formats found in search queries to
//! the canonical forms stored in paper metadata, e.g. "3rd" -> "III" and
//! "phy" -> "physics". Tokens not in the table pass through unchanged.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Fixed translation table, built once at first use.
///
/// Coverage is intentionally uneven (no word forms for nine/ten, no ordinals
/// past 8th); it mirrors the vocabulary actually used on uploaded papers.
static TRANSLATION_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Digits to Roman numerals
        ("1", "I"),
        ("2", "II"),
        ("3", "III"),
        ("4", "IV"),
        ("5", "V"),
        ("6", "VI"),
        ("7", "VII"),
        ("8", "VIII"),
        ("9", "IX"),
        ("10", "X"),
        // Word numbers to Roman numerals
        ("one", "I"),
        ("two", "II"),
        ("three", "III"),
        ("four", "IV"),
        ("five", "V"),
        ("six", "VI"),
        ("seven", "VII"),
        ("eight", "VIII"),
        // Ordinal numbers to Roman numerals
        ("1st", "I"),
        ("2nd", "II"),
        ("3rd", "III"),
        ("4th", "IV"),
        ("5th", "V"),
        ("6th", "VI"),
        ("7th", "VII"),
        ("8th", "VIII"),
        // Lowercase Roman to uppercase Roman
        ("i", "I"),
        ("ii", "II"),
        ("iii", "III"),
        ("iv", "IV"),
        ("v", "V"),
        ("vi", "VI"),
        ("vii", "VII"),
        ("viii", "VIII"),
        ("ix", "IX"),
        ("x", "X"),
        // Semester keyword
        ("sem", "semester"),
        ("semester", "semester"),
        // Subject abbreviations
        ("phy", "physics"),
        ("pys", "psychology"),
        ("env", "environmental"),
        ("sci", "science"),
        ("his", "history"),
        ("eco", "economics"),
        ("stats", "statistics"),
        ("biotech", "biotechnology"),
        ("cs", "computer"),
        ("ps", "political"),
        ("geo", "geography"),
        ("zoo", "zoology"),
        ("bot", "botany"),
        ("eng", "english"),
        ("hin", "hindi"),
        ("chem", "chemistry"),
    ])
});

/// Translate a single lowercase search token to its canonical form.
///
/// Exact lookup only: no partial matching, no stemming. Unknown tokens are
/// returned as-is.
pub fn translate(term: &str) -> &str {
    TRANSLATION_MAP.get(term).copied().unwrap_or(term)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeral_forms() {
        assert_eq!(translate("1"), "I");
        assert_eq!(translate("3"), "III");
        assert_eq!(translate("10"), "X");
        assert_eq!(translate("three"), "III");
        assert_eq!(translate("eight"), "VIII");
        assert_eq!(translate("3rd"), "III");
        assert_eq!(translate("8th"), "VIII");
        assert_eq!(translate("iii"), "III");
        assert_eq!(translate("ix"), "IX");
        assert_eq!(translate("x"), "X");
    }

    #[test]
    fn test_semester_keyword() {
        assert_eq!(translate("sem"), "semester");
        assert_eq!(translate("semester"), "semester");
    }

    #[test]
    fn test_subject_abbreviations() {
        assert_eq!(translate("phy"), "physics");
        assert_eq!(translate("pys"), "psychology");
        assert_eq!(translate("env"), "environmental");
        assert_eq!(translate("sci"), "science");
        assert_eq!(translate("his"), "history");
        assert_eq!(translate("eco"), "economics");
        assert_eq!(translate("stats"), "statistics");
        assert_eq!(translate("biotech"), "biotechnology");
        assert_eq!(translate("cs"), "computer");
        assert_eq!(translate("ps"), "political");
        assert_eq!(translate("geo"), "geography");
        assert_eq!(translate("zoo"), "zoology");
        assert_eq!(translate("bot"), "botany");
        assert_eq!(translate("eng"), "english");
        assert_eq!(translate("hin"), "hindi");
        assert_eq!(translate("chem"), "chemistry");
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        assert_eq!(translate("physics"), "physics");
        assert_eq!(translate("2024"), "2024");
        assert_eq!(translate("ba"), "ba");
        assert_eq!(translate(""), "");
    }

    #[test]
    fn test_table_gaps_are_not_filled() {
        // Word forms beyond eight and ordinals beyond 8th are deliberately absent
        assert_eq!(translate("nine"), "nine");
        assert_eq!(translate("ten"), "ten");
        assert_eq!(translate("9th"), "9th");
        assert_eq!(translate("10th"), "10th");
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // Callers lowercase the query first; uppercase input is not mapped
        assert_eq!(translate("PHY"), "PHY");
        assert_eq!(translate("III"), "III");
    }
}
