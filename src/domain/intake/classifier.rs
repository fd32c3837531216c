//! Solution-statement classifier.
//!
//! Spots first messages that already describe something to build, so the
//! conversation can skip the solution-shaping phase.

/// Terms that signal the user is describing a concrete solution.
pub const SOLUTION_VOCABULARY: &[&str] = &[
    "build",
    "create",
    "develop",
    "mobile app",
    "website",
    "system",
    "platform",
    "portal",
    "dashboard",
];

/// Returns true if `text` mentions any solution term, ignoring case.
///
/// Plain substring matching: "rebuild" and "ecosystem" count too.
pub fn is_solution_statement(text: &str) -> bool {
    let lower = text.to_lowercase();
    SOLUTION_VOCABULARY.iter().any(|term| lower.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_build_request() {
        assert!(is_solution_statement("I want to build a booking system"));
    }

    #[test]
    fn detects_multi_word_terms() {
        assert!(is_solution_statement("We need a Mobile App for drivers"));
    }

    #[test]
    fn is_case_insensitive() {
        assert!(is_solution_statement("A customer PORTAL would help"));
    }

    #[test]
    fn plain_problem_statement_does_not_fire() {
        assert!(!is_solution_statement(
            "Our staff lose track of customer orders every week"
        ));
    }

    #[test]
    fn empty_text_does_not_fire() {
        assert!(!is_solution_statement(""));
    }

    #[test]
    fn matches_substrings_inside_words() {
        assert!(is_solution_statement("the whole ecosystem is slow"));
    }
}
