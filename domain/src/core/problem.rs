//! Problem statement value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A problem for the panel to debate (Value Object)
///
/// Immutable once created and never empty or whitespace-only. Validation
/// happens here so the debate rejects bad input before touching any
/// collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemStatement {
    content: String,
}

impl ProblemStatement {
    /// Create a new problem statement, rejecting empty input.
    pub fn new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::EmptyProblem);
        }
        Ok(Self { content })
    }

    /// Get the problem text
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for ProblemStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for ProblemStatement {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ProblemStatement::new(s)
    }
}

impl From<ProblemStatement> for String {
    fn from(p: ProblemStatement) -> Self {
        p.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_creation() {
        let p = ProblemStatement::new("Design a Mars currency").unwrap();
        assert_eq!(p.content(), "Design a Mars currency");
    }

    #[test]
    fn test_empty_problem_rejected() {
        assert_eq!(ProblemStatement::new(""), Err(DomainError::EmptyProblem));
        assert_eq!(ProblemStatement::new("  \n\t "), Err(DomainError::EmptyProblem));
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        let result: Result<ProblemStatement, _> = serde_json::from_str("\"   \"");
        assert!(result.is_err());
        let ok: ProblemStatement = serde_json::from_str("\"Build it\"").unwrap();
        assert_eq!(ok.content(), "Build it");
    }
}
