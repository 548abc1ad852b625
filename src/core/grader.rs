use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;

/// External questionnaire-grading collaborator. The service returns free
/// text; the only structure this system relies on is the final grade line.
#[allow(async_fn_in_trait)]
pub trait Grader {
    async fn questions(&self) -> Result<Vec<String>, Error>;
    /// Returns the raw evaluation text for a completed questionnaire.
    async fn evaluate(&self, questions: &[String], answers: &[String]) -> Result<String, Error>;
}

/// Pulls the letter grade out of an evaluation, matching
/// `Overall Grade: <A-F>` case-insensitively.
pub fn extract_grade(evaluation: &str) -> Option<char> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"(?i)Overall Grade:?\s*([A-F])").expect("grade pattern is valid"));
    re.captures(evaluation)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().chars().next())
        .map(|c| c.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_grade_with_colon() {
        let text = "Strong answers overall.\nOverall Grade: B\nKeep it up.";
        assert_eq!(extract_grade(text), Some('B'));
    }

    #[test]
    fn extraction_is_case_insensitive_and_colon_optional() {
        assert_eq!(extract_grade("overall grade c"), Some('C'));
        assert_eq!(extract_grade("OVERALL GRADE:   a"), Some('A'));
    }

    #[test]
    fn missing_grade_yields_none() {
        assert_eq!(extract_grade("The answers were thoughtful."), None);
        assert_eq!(extract_grade("Overall Grade: Z"), None);
    }
}
