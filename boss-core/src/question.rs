//! Questions, answer options, and the generator response format.
//!
//! The generator replies with five comma-separated, optionally quoted
//! segments: the question followed by four `label:verdict` pairs.
//!
//! ```text
//! 'What is 2+2?','3:wrong','4:correct','5:wrong','6:wrong'
//! ```

use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

const SEGMENT_COUNT: usize = OPTION_COUNT + 1;

/// Boss line shown when the generator could not produce a question.
pub const FALLBACK_QUESTION_TEXT: &str = "The boss is suddenly confused! Strike!";

/// Errors from asking the generator for content.
///
/// None of these ever reach the player: the caller substitutes fallback
/// content instead.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Claude API error: {0}")]
    Api(#[from] claude::Error),

    #[error("Generator unavailable: {0}")]
    Unavailable(String),

    #[error("Generator did not answer within {0:?}")]
    Timeout(Duration),

    #[error("Expected 5 segments, found {found}")]
    SegmentCount { found: usize },

    #[error("Answer option is not a label:verdict pair: {0:?}")]
    MalformedOption(String),

    #[error("Question text is empty")]
    EmptyQuestion,
}

/// Whether an answer option is the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Wrong,
}

impl Verdict {
    /// Interpret a verdict tag. Only `correct` counts as correct.
    ///
    /// Surrounding whitespace and case are ignored, so `" correct"` and
    /// `"CORRECT"` are both correct. Models often pad the tag after the colon.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("correct") {
            Verdict::Correct
        } else {
            Verdict::Wrong
        }
    }

    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }

    pub fn tag(self) -> &'static str {
        match self {
            Verdict::Correct => "correct",
            Verdict::Wrong => "wrong",
        }
    }
}

/// One selectable answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub label: String,
    pub verdict: Verdict,
}

impl AnswerOption {
    pub fn new(label: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            label: label.into(),
            verdict,
        }
    }

    pub fn correct(label: impl Into<String>) -> Self {
        Self::new(label, Verdict::Correct)
    }

    pub fn wrong(label: impl Into<String>) -> Self {
        Self::new(label, Verdict::Wrong)
    }

    /// Parse a `label:verdict` pair, splitting on the last colon.
    pub fn parse(segment: &str) -> Result<Self, GenerationError> {
        let (label, tag) = segment
            .rsplit_once(':')
            .ok_or_else(|| GenerationError::MalformedOption(segment.to_string()))?;

        let label = label.trim();
        if label.is_empty() {
            return Err(GenerationError::MalformedOption(segment.to_string()));
        }

        Ok(Self::new(label, Verdict::from_tag(tag)))
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.verdict.tag())
    }
}

/// A question with exactly four answer options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    pub options: [AnswerOption; OPTION_COUNT],
}

impl Question {
    /// The trivial question used whenever generation fails.
    pub fn fallback() -> Self {
        Self {
            text: FALLBACK_QUESTION_TEXT.to_string(),
            options: [
                AnswerOption::correct("ATTACK"),
                AnswerOption::correct("ATTACK"),
                AnswerOption::correct("ATTACK"),
                AnswerOption::wrong("MISS"),
            ],
        }
    }

    /// Index of the first correct option, if any.
    pub fn correct_position(&self) -> Option<usize> {
        self.options.iter().position(|o| o.verdict.is_correct())
    }
}

/// Parse a raw generator reply.
///
/// Only the structure is checked: segment count, a non-empty question, and
/// a colon in every option. How many options are tagged correct is left to
/// the generator.
pub fn parse_question(raw: &str) -> Result<Question, GenerationError> {
    let segments: Vec<&str> = raw.split(',').map(clean_segment).collect();
    if segments.len() != SEGMENT_COUNT {
        return Err(GenerationError::SegmentCount {
            found: segments.len(),
        });
    }

    let text = segments[0];
    if text.is_empty() {
        return Err(GenerationError::EmptyQuestion);
    }

    let options = [
        AnswerOption::parse(segments[1])?,
        AnswerOption::parse(segments[2])?,
        AnswerOption::parse(segments[3])?,
        AnswerOption::parse(segments[4])?,
    ];

    Ok(Question {
        text: text.to_string(),
        options,
    })
}

fn clean_segment(segment: &str) -> &str {
    segment.trim().trim_matches(|c| c == '\'' || c == '"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let q = parse_question("'What is 2+2?','3:wrong','4:correct','5:wrong','6:wrong'").unwrap();

        assert_eq!(q.text, "What is 2+2?");
        assert_eq!(q.options[0], AnswerOption::wrong("3"));
        assert_eq!(q.options[1], AnswerOption::correct("4"));
        assert_eq!(q.options[2], AnswerOption::wrong("5"));
        assert_eq!(q.options[3], AnswerOption::wrong("6"));
        assert_eq!(q.correct_position(), Some(1));
    }

    #[test]
    fn test_parse_unquoted_and_double_quoted() {
        let q = parse_question(
            "\"Who painted the Mona Lisa?\", Michelangelo:wrong, Picasso:wrong, Van Gogh:wrong, Leonardo da Vinci:correct\n",
        )
        .unwrap();

        assert_eq!(q.text, "Who painted the Mona Lisa?");
        assert_eq!(q.options[3].label, "Leonardo da Vinci");
        assert!(q.options[3].verdict.is_correct());
    }

    #[test]
    fn test_label_may_contain_colons() {
        let q = parse_question("'Pick a time','12:30:correct','1:wrong','2:wrong','3:wrong'").unwrap();
        assert_eq!(q.options[0].label, "12:30");
        assert!(q.options[0].verdict.is_correct());
    }

    #[test]
    fn test_verdict_tag_is_trimmed_and_case_insensitive() {
        assert_eq!(Verdict::from_tag(" correct"), Verdict::Correct);
        assert_eq!(Verdict::from_tag("CORRECT"), Verdict::Correct);
        assert_eq!(Verdict::from_tag("wrong"), Verdict::Wrong);
        assert_eq!(Verdict::from_tag("maybe"), Verdict::Wrong);
    }

    #[test]
    fn test_too_few_segments() {
        let err = parse_question("'Q?','a:correct','b:wrong'").unwrap_err();
        assert!(matches!(err, GenerationError::SegmentCount { found: 3 }));
    }

    #[test]
    fn test_too_many_segments() {
        // A comma inside an answer breaks the format.
        let err = parse_question("'Q?','1,000:correct','b:wrong','c:wrong','d:wrong'").unwrap_err();
        assert!(matches!(err, GenerationError::SegmentCount { found: 6 }));
    }

    #[test]
    fn test_option_without_colon() {
        let err = parse_question("'Q?','a','b:wrong','c:wrong','d:correct'").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedOption(_)));
    }

    #[test]
    fn test_empty_question() {
        let err = parse_question("'','a:correct','b:wrong','c:wrong','d:wrong'").unwrap_err();
        assert!(matches!(err, GenerationError::EmptyQuestion));
    }

    #[test]
    fn test_fallback_question() {
        let q = Question::fallback();
        let rendered: Vec<String> = q.options.iter().map(|o| o.to_string()).collect();

        assert_eq!(q.text, FALLBACK_QUESTION_TEXT);
        assert_eq!(
            rendered,
            ["ATTACK:correct", "ATTACK:correct", "ATTACK:correct", "MISS:wrong"]
        );
    }
}
