use thiserror::Error;

/// All error kinds the engine can surface. Propagated unmodified to the
/// caller; no retries, no silent fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitsError {
    #[error("incommensurable units: {lhs} vs {rhs} in {operation}")]
    UnitMismatch {
        lhs: String,
        rhs: String,
        operation: &'static str,
    },

    #[error("unknown unit '{name}'")]
    UnknownUnit {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("unit '{0}' is already registered")]
    DuplicateUnit(String),

    #[error("failed to parse unit formula '{formula}': {reason}")]
    ParseError { formula: String, reason: String },

    #[error("{0}")]
    TypeError(String),

    #[error("division by zero in exponent of formula '{0}'")]
    ZeroDivision(String),
}

impl UnitsError {
    /// Suggestions attached to an `UnknownUnit`, formatted for display; empty for
    /// every other variant.
    pub fn suggestion_text(&self) -> String {
        match self {
            UnitsError::UnknownUnit { suggestions, .. } if !suggestions.is_empty() => {
                format!(" (did you mean: {}?)", suggestions.join(", "))
            }
            _ => String::new(),
        }
    }

    pub fn unit_mismatch(lhs: impl Into<String>, rhs: impl Into<String>, operation: &'static str) -> Self {
        UnitsError::UnitMismatch {
            lhs: lhs.into(),
            rhs: rhs.into(),
            operation,
        }
    }

    pub fn unknown_unit(name: impl Into<String>) -> Self {
        UnitsError::UnknownUnit {
            name: name.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn unknown_unit_with_suggestions(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        UnitsError::UnknownUnit {
            name: name.into(),
            suggestions,
        }
    }
}

pub type Result<T> = std::result::Result<T, UnitsError>;
