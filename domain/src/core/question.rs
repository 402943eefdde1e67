//! Question value object

use serde::{Deserialize, Serialize};

/// A message submitted by the user (Value Object)
///
/// The only validation is non-emptiness: whitespace is preserved and sent
/// to the backend verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None for empty input
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::try_new("How do solar panels work?").unwrap();
        assert_eq!(q.content(), "How do solar panels work?");
    }

    #[test]
    fn test_try_new_empty() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new(String::new()).is_none());
    }

    #[test]
    fn test_whitespace_is_kept_verbatim() {
        let q = Question::try_new("  hi \n").unwrap();
        assert_eq!(q.content(), "  hi \n");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let q = Question::try_new("hello").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"hello\"");
    }
}
